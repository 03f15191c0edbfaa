// Reader for the nested per-assembly JSON export ("form20" provider).
//
// The top level is a mapping whose `AC_<id>_FINAL` entries each hold an
// array of flat station objects. Any other top-level entry is skipped, and
// group order follows the key order of the file.

use std::fs;

use log::{debug, warn};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use assembly_data::{parse_group_key, RawExport, RawRecord, RawValue};

use crate::dash::config_reader::{ExportSource, PercentageScale};
use crate::dash::io_common::scale_share;
use crate::dash::{DashResult, OpeningJsonSnafu, ParsingJsonSnafu};

pub fn read_json(path: String, source: &ExportSource) -> DashResult<RawExport> {
    let scale = source.percentage_scale()?;
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path: path.clone() })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let top = match js.as_object() {
        Some(x) => x,
        None => whatever!("form20 export root is not a JSON object: {}", path),
    };

    let mut export = RawExport::default();
    for (key, value) in top {
        let ac_id = match parse_group_key(key) {
            Some(id) => id,
            None => {
                debug!("read_json: skipping non-group key {:?}", key);
                continue;
            }
        };
        let entries = match value.as_array() {
            Some(x) => x,
            None => {
                warn!("read_json: group {:?} is not an array, skipping", key);
                continue;
            }
        };
        for entry in entries {
            let obj = match entry.as_object() {
                Some(x) => x,
                None => {
                    warn!("read_json: non-object entry in group {:?}, skipping", key);
                    continue;
                }
            };
            let mut record = RawRecord::new();
            for (column, cell) in obj {
                record.push(column.clone(), raw_value(column, cell, scale));
            }
            export.push_record(ac_id.clone(), record);
        }
    }
    debug!(
        "read_json: {} groups, {} records",
        export.groups.len(),
        export.record_count()
    );
    Ok(export)
}

fn raw_value(column: &str, cell: &JSValue, scale: PercentageScale) -> RawValue {
    let value = match cell {
        JSValue::Number(n) => n
            .as_f64()
            .map(RawValue::Number)
            .unwrap_or(RawValue::Missing),
        JSValue::String(s) => RawValue::Text(s.clone()),
        _ => RawValue::Missing,
    };
    scale_share(column, value, scale)
}
