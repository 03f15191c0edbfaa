// Primitives for reading flat CSV station exports.
//
// One row per polling station, grouped by the assembly-id column. Groups
// come out in first-seen row order, which keeps the report order stable for
// a given file.

use log::debug;
use snafu::prelude::*;

use assembly_data::{AssemblyId, RawExport, RawRecord, RawValue};

use crate::dash::config_reader::ExportSource;
use crate::dash::io_common::scale_share;
use crate::dash::{CsvLineParseSnafu, CsvOpenSnafu, DashResult, MissingColumnSnafu};

pub fn read_csv_export(path: String, source: &ExportSource) -> DashResult<RawExport> {
    let scale = source.percentage_scale()?;
    let assembly_column = source.assembly_column();

    let rdr = csv::ReaderBuilder::new()
        .from_path(path.as_str())
        .context(CsvOpenSnafu { path: path.clone() });
    let mut rdr = rdr?;
    let headers = rdr
        .headers()
        .context(CsvOpenSnafu { path: path.clone() })?
        .clone();
    let ac_idx = headers
        .iter()
        .position(|h| h == assembly_column)
        .context(MissingColumnSnafu {
            column: assembly_column.to_string(),
            path: path.clone(),
        })?;

    let mut export = RawExport::default();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The header occupies the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let ac_raw = line.get(ac_idx).unwrap_or("");
        if ac_raw.trim().is_empty() {
            debug!("read_csv_export: line {} has no assembly id, skipping", lineno);
            continue;
        }
        let ac_id = AssemblyId::new(ac_raw);

        let mut record = RawRecord::new();
        for (column, cell) in headers.iter().zip(line.iter()) {
            if column == assembly_column {
                continue;
            }
            let value = if cell.is_empty() {
                RawValue::Missing
            } else {
                RawValue::Text(cell.to_string())
            };
            record.push(column, scale_share(column, value, scale));
        }
        export.push_record(ac_id, record);
    }
    debug!(
        "read_csv_export: {} groups, {} records",
        export.groups.len(),
        export.record_count()
    );
    Ok(export)
}
