use log::{info, warn};

use assembly_data::*;
use snafu::{prelude::*, Snafu};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use text_diff::print_diff;

use crate::args::Args;
use crate::dash::config_reader::*;
use crate::dash::io_common::report_file_name;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_form20;

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("CSV parse failure around line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Column {column} not found in {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Unknown provider {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("No export sources configured: pass --input or list exportSources in the configuration"))]
    NoExportSources {},
    #[snafu(display("Error writing report to {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;

pub fn run_report(args: &Args) -> DashResult<()> {
    let config = load_config(args)?;
    info!("config: {:?}", config);

    if config.export_sources.is_empty() {
        return NoExportSourcesSnafu {}.fail();
    }

    let root = source_root(args)?;
    let mut export = RawExport::default();
    for source in &config.export_sources {
        let file_export = read_export_data(&root, source)?;
        info!(
            "read {} records in {} groups from {}",
            file_export.record_count(),
            file_export.groups.len(),
            source.file_path
        );
        export.merge(file_export);
    }

    // When the report is scoped to a user, the station list goes through the
    // same access resolution the dashboard applies.
    let access = config
        .user
        .as_ref()
        .map(|user| resolve_access(user, &ASSEMBLIES));
    let requested = args.assembly.as_deref().or(config.assembly.as_deref());
    let (selected, stations) = scope_stations(&export, requested, access.as_ref());
    info!(
        "normalized {} stations (selected assembly: {:?})",
        stations.len(),
        selected
    );

    let constituency = match &selected {
        Some(id) => assembly_name(id),
        None => config.output_settings.report_name.clone(),
    };
    let performance = candidate_performance(&stations);
    let stats = regional_stats(&stations);
    let summary = report_summary(&stations, constituency.as_str());

    let header = ReportHeader {
        report: config.output_settings.report_name.clone(),
        assembly: selected,
        role: access.as_ref().map(|a| a.role.label().to_string()),
    };
    let report_js = json!({
        "config": header,
        "access": access,
        "stations": stations,
        "candidatePerformance": performance,
        "regionalStats": stats,
        "summary": summary,
    });

    let pretty_report = serde_json::to_string_pretty(&report_js).context(ParsingJsonSnafu {})?;
    write_report(args, &config, pretty_report.as_str())?;

    // The reference report, if provided for comparison.
    if let Some(reference_path) = &args.reference {
        let reference = read_reference(reference_path.clone())?;
        let pretty_reference =
            serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
        if pretty_reference != pretty_report {
            warn!("Found differences with the reference report");
            print_diff(pretty_reference.as_str(), pretty_report.as_ref(), "\n");
            whatever!("Difference detected between generated report and reference report")
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> DashResult<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path.clone())?,
        None => ReportConfig::default(),
    };
    if let Some(input) = &args.input {
        config.export_sources = vec![ExportSource::direct(input.clone())];
    }
    Ok(config)
}

// Export paths inside a configuration file are relative to the file itself;
// a direct --input path is taken as given.
fn source_root(args: &Args) -> DashResult<PathBuf> {
    if args.input.is_some() {
        return Ok(PathBuf::new());
    }
    match &args.config {
        Some(config_path) => {
            let parent = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?;
            Ok(parent.to_path_buf())
        }
        None => Ok(PathBuf::new()),
    }
}

fn read_export_data(root_path: &Path, source: &ExportSource) -> DashResult<RawExport> {
    let p: PathBuf = root_path.join(source.file_path.as_str());
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read export file {:?}", p2);
    match source.provider.as_str() {
        "form20" => io_form20::read_json(p2, source),
        "csv" => io_csv::read_csv_export(p2, source),
        x => UnknownProviderSnafu {
            provider: x.to_string(),
        }
        .fail(),
    }
}

/// Picks the station list the report covers.
///
/// Without a user the requested assembly (or everything) is read as-is. A
/// client-scoped report goes through selection repair: a requested assembly
/// outside the allow-list falls back to the first allowed one, and with no
/// request the report covers every allowed assembly. A client with no
/// assembly access gets an empty report.
fn scope_stations(
    export: &RawExport,
    requested: Option<&str>,
    access: Option<&AccessResolution>,
) -> (Option<String>, Vec<PollingStation>) {
    match access {
        Some(acc) if !acc.role.is_admin() => match requested {
            Some(wanted) => match repair_assembly_selection(Some(wanted), &acc.assemblies) {
                Some(id) => {
                    let target = AssemblyId::new(id.as_str());
                    (Some(id), normalize_stations(export, Some(&target)))
                }
                None => (None, Vec::new()),
            },
            None => {
                let allowed: HashSet<AssemblyId> = acc
                    .assemblies
                    .iter()
                    .map(|a| AssemblyId::new(a.id))
                    .collect();
                let stations = normalize_stations(export, None)
                    .into_iter()
                    .filter(|st| allowed.contains(&st.ac_id))
                    .collect();
                (None, stations)
            }
        },
        _ => match requested {
            Some(wanted) => {
                let target = AssemblyId::new(wanted);
                (
                    Some(wanted.to_string()),
                    normalize_stations(export, Some(&target)),
                )
            }
            None => (None, normalize_stations(export, None)),
        },
    }
}

fn write_report(args: &Args, config: &ReportConfig, pretty: &str) -> DashResult<()> {
    let destination: Option<PathBuf> = match args.out.as_deref() {
        Some("stdout") | Some("") => None,
        Some(path) => Some(PathBuf::from(path)),
        None => config
            .output_settings
            .output_directory
            .as_ref()
            .map(|dir| Path::new(dir).join(report_file_name(&config.output_settings.report_name))),
    };
    match destination {
        Some(path) => {
            info!("Writing report to {:?}", path);
            fs::write(&path, pretty).context(WritingReportSnafu {
                path: path.display().to_string(),
            })?;
        }
        None => {
            println!("report:{}", pretty);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_export() -> RawExport {
        let mut export = RawExport::default();
        for (ac, ps, share) in [("24", 1.0, 43.2), ("24", 2.0, 37.11), ("12", 1.0, 51.0)] {
            let mut record = RawRecord::new();
            record.push("PS_NO_2021", RawValue::Number(ps));
            record.push("POLLED_2021", RawValue::Number(800.0));
            record.push("AINRC_2021_pct", RawValue::Number(share));
            export.push_record(AssemblyId::new(ac), record);
        }
        export
    }

    fn client(assemblies: Vec<&str>) -> AccessResolution {
        let user = UserRecord {
            role: Some("client".to_string()),
            accessible_assemblies: Some(assemblies.into_iter().map(str::to_string).collect()),
            accessible_pages: None,
            accessible_admin_sections: None,
        };
        resolve_access(&user, &ASSEMBLIES)
    }

    #[test]
    fn scope_without_user_reads_everything() {
        let export = sample_export();
        let (selected, stations) = scope_stations(&export, None, None);
        assert_eq!(selected, None);
        assert_eq!(stations.len(), 3);
    }

    #[test]
    fn scope_without_user_honors_request() {
        let export = sample_export();
        let (selected, stations) = scope_stations(&export, Some("24.0"), None);
        assert_eq!(selected, Some("24.0".to_string()));
        assert_eq!(stations.len(), 2);
    }

    #[test]
    fn scope_client_restricted_to_allow_list() {
        let export = sample_export();
        let access = client(vec!["12"]);
        let (selected, stations) = scope_stations(&export, None, Some(&access));
        assert_eq!(selected, None);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].ac_id, AssemblyId::new("12"));
    }

    #[test]
    fn scope_client_request_is_repaired() {
        let export = sample_export();
        let access = client(vec!["12"]);
        // Assembly 24 exists in the export but is not allowed for this user.
        let (selected, stations) = scope_stations(&export, Some("24"), Some(&access));
        assert_eq!(selected, Some("12".to_string()));
        assert_eq!(stations.len(), 1);
    }

    #[test]
    fn scope_client_without_access_is_empty() {
        let export = sample_export();
        let access = client(vec![]);
        let (selected, stations) = scope_stations(&export, Some("24"), Some(&access));
        assert_eq!(selected, None);
        assert!(stations.is_empty());
    }

    #[test]
    fn scope_admin_request_is_not_repaired() {
        let export = sample_export();
        let user = UserRecord {
            role: Some("admin".to_string()),
            ..UserRecord::default()
        };
        let access = resolve_access(&user, &ASSEMBLIES);
        let (selected, stations) = scope_stations(&export, Some("12"), Some(&access));
        assert_eq!(selected, Some("12".to_string()));
        assert_eq!(stations.len(), 1);
    }
}
