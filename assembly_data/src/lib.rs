mod access;
mod analytics;
mod catalog;
mod model;
pub mod quick_start;
mod schema;
mod session;

use std::collections::BTreeMap;

use log::{debug, info};

pub use crate::access::*;
pub use crate::analytics::*;
pub use crate::catalog::*;
pub use crate::model::*;
pub use crate::schema::*;
pub use crate::session::*;

/// Normalizes a raw export into typed polling-station records.
///
/// Arguments:
/// * `export` the raw export to read
/// * `target` an optional assembly filter. With a filter only the matching
/// group is read; an id matching no group yields an empty list, which is
/// indistinguishable from an id with no data. Without a filter every group
/// is read.
///
/// Output order is group enumeration order, then record order within each
/// group. The function is pure: identical inputs produce structurally
/// identical outputs.
pub fn normalize_stations(
    export: &RawExport,
    target: Option<&AssemblyId>,
) -> Vec<PollingStation> {
    info!(
        "normalize_stations: {} groups, filter: {:?}",
        export.groups.len(),
        target
    );
    let mut stations: Vec<PollingStation> = Vec::new();
    for group in &export.groups {
        if let Some(wanted) = target {
            if group.ac_id != *wanted {
                continue;
            }
        }
        debug!(
            "normalize_stations: group {} with {} records",
            group.ac_id,
            group.records.len()
        );
        for (index, record) in group.records.iter().enumerate() {
            stations.push(normalize_record(&group.ac_id, index, record));
        }
    }
    stations
}

fn normalize_record(ac_id: &AssemblyId, index: usize, record: &RawRecord) -> PollingStation {
    let mut candidates: BTreeMap<u16, BTreeMap<String, f64>> = ELECTION_YEARS
        .iter()
        .map(|&year| (year, BTreeMap::new()))
        .collect();
    for (name, value) in record.iter() {
        if let ColumnKind::CandidateShare { candidate, year } = classify_column(name) {
            if let Some(year_map) = candidates.get_mut(&year) {
                year_map.insert(candidate.to_string(), parse_numeric(value));
            }
        }
    }

    // Identity prefers the explicit station number; a record without one
    // falls back to its position in the group, which is not stable across
    // re-imports that reorder rows.
    let ps_no = record
        .display(COL_STATION_NUMBER)
        .unwrap_or_else(|| index.to_string());
    let locality = record.display(COL_LOCALITY);
    let ac_name = locality
        .clone()
        .unwrap_or_else(|| format!("AC {}", ac_id));

    let election2011 = year_result(&mut candidates, record, 2011);
    let election2016 = year_result(&mut candidates, record, 2016);
    let election2021 = year_result(&mut candidates, record, 2021);

    PollingStation {
        id: format!("{}_{}", ac_id, ps_no),
        ac_id: ac_id.clone(),
        ac_name,
        ps_name: ps_no.clone(),
        ps_no,
        locality: locality.unwrap_or_default(),
        latitude: record.get(COL_LATITUDE).map(parse_numeric).unwrap_or(0.0),
        longitude: record.get(COL_LONGITUDE).map(parse_numeric).unwrap_or(0.0),
        category: record.display(COL_TOP_CATEGORY).unwrap_or_default(),
        strongest_party: record.display(COL_TOP_PARTY).unwrap_or_default(),
        election2011,
        election2016,
        election2021,
    }
}

fn year_result(
    candidates: &mut BTreeMap<u16, BTreeMap<String, f64>>,
    record: &RawRecord,
    year: u16,
) -> ElectionResult {
    let polled = turnout_column(year);
    ElectionResult {
        year,
        total_votes: record
            .get(polled.as_str())
            .map(parse_numeric)
            .unwrap_or(0.0),
        candidates: candidates.remove(&year).unwrap_or_default(),
    }
}
