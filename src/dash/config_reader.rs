use crate::dash::*;

use std::fs;

use assembly_data::UserRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportName")]
    pub report_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

impl Default for OutputSettings {
    fn default() -> OutputSettings {
        OutputSettings {
            report_name: "Polling station report".to_string(),
            output_directory: None,
        }
    }
}

/// The share scale a source declares for its `_pct` columns. Fraction
/// sources are converted to canonical percent once at ingestion; nothing
/// downstream guesses the scale from value magnitudes.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum PercentageScale {
    Percent,
    Fraction,
}

impl PercentageScale {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            PercentageScale::Percent => x,
            PercentageScale::Fraction => x * 100.0,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ExportSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// CSV provider only: the column carrying the assembly id.
    #[serde(rename = "assemblyColumn")]
    pub assembly_column: Option<String>,
    #[serde(rename = "percentageScale")]
    _percentage_scale: Option<String>,
}

impl ExportSource {
    /// A form20 source for a directly given export path.
    pub fn direct(file_path: String) -> ExportSource {
        ExportSource {
            provider: "form20".to_string(),
            file_path,
            assembly_column: None,
            _percentage_scale: None,
        }
    }

    pub fn percentage_scale(&self) -> DashResult<PercentageScale> {
        match self._percentage_scale.as_deref() {
            None | Some("percent") => Ok(PercentageScale::Percent),
            Some("fraction") => Ok(PercentageScale::Fraction),
            Some(x) => whatever!("unknown percentage scale: {}", x),
        }
    }

    pub fn assembly_column(&self) -> &str {
        self.assembly_column.as_deref().unwrap_or("AC_ID")
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "exportSources", default)]
    pub export_sources: Vec<ExportSource>,
    /// Restrict the report to one assembly. The command line flag wins over
    /// this field when both are given.
    pub assembly: Option<String>,
    /// The user document the report is scoped to, as stored by the
    /// authentication layer.
    pub user: Option<UserRecord>,
}

/// The `config` block echoed at the top of a generated report.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportHeader {
    pub report: String,
    pub assembly: Option<String>,
    pub role: Option<String>,
}

pub fn read_config(path: String) -> DashResult<ReportConfig> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_reference(path: String) -> DashResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
