// Schema of the raw polling-station exports.
//
// All knowledge of the export naming conventions lives here: the
// `AC_<id>_FINAL` group keys, the `<CANDIDATE>_<year>_pct` share columns,
// the per-year `POLLED_` and `PS_NO_` columns, and the reserved
// pseudo-candidates that must never be enumerated as parties.

use crate::model::{AssemblyId, ELECTION_YEARS};

/// Keys that must not be treated as candidate parties.
pub const NON_CANDIDATE_KEYS: [&str; 4] = ["VOTERS", "NOTA", "PS_NO", "POLLED"];

const GROUP_PREFIX: &str = "AC_";
const GROUP_SUFFIX: &str = "_FINAL";

// Metadata columns of a station record.
pub const COL_LOCALITY: &str = "LOCALITY_EXTRACTED";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_TOP_CATEGORY: &str = "TOP_SCORE_CATEGORY";
pub const COL_TOP_PARTY: &str = "TOP_SCORE_PARTY";
/// The station-number column station identity is built from.
pub const COL_STATION_NUMBER: &str = "PS_NO_2021";

/// Name of the polled-count column for a year.
pub fn turnout_column(year: u16) -> String {
    format!("POLLED_{}", year)
}

/// One cell of a raw export.
#[derive(PartialEq, Debug, Clone)]
pub enum RawValue {
    Number(f64),
    Text(String),
    /// Anything the source could not represent as a scalar.
    Missing,
}

impl RawValue {
    /// The display form used for identity and metadata columns. Blank text
    /// and non-scalar cells have no display form.
    pub fn display(&self) -> Option<String> {
        match self {
            RawValue::Number(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => {
                Some(format!("{}", *x as i64))
            }
            RawValue::Number(x) if x.is_finite() => Some(format!("{}", x)),
            RawValue::Number(_) => None,
            RawValue::Text(s) if s.trim().is_empty() => None,
            RawValue::Text(s) => Some(s.trim().to_string()),
            RawValue::Missing => None,
        }
    }
}

/// Coerce a raw cell to a number.
///
/// Finite numbers pass through. Text parses as a float, and anything
/// non-numeric (placeholders such as `"NEW_BOOTH"` included) coerces to
/// exactly 0, indistinguishable from a true zero. This lossy rule is part
/// of the output contract and must not be repaired to a missing-value
/// marker.
pub fn parse_numeric(value: &RawValue) -> f64 {
    match value {
        RawValue::Number(x) if x.is_finite() => *x,
        RawValue::Number(_) => 0.0,
        RawValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => x,
            _ => 0.0,
        },
        RawValue::Missing => 0.0,
    }
}

/// A flat station record: column names to cells, in source order.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawRecord {
    columns: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> RawRecord {
        RawRecord::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: RawValue) {
        self.columns.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn display(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|v| v.display())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// The records of one `AC_<id>_FINAL` group.
#[derive(PartialEq, Debug, Clone)]
pub struct AssemblyGroup {
    pub ac_id: AssemblyId,
    pub records: Vec<RawRecord>,
}

/// A full raw export: assembly groups in source enumeration order.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawExport {
    pub groups: Vec<AssemblyGroup>,
}

impl RawExport {
    /// Appends a record to its assembly group, creating the group at the end
    /// of the list on first sight. Group order is therefore first-seen order.
    pub fn push_record(&mut self, ac_id: AssemblyId, record: RawRecord) {
        match self.groups.iter_mut().find(|g| g.ac_id == ac_id) {
            Some(group) => group.records.push(record),
            None => self.groups.push(AssemblyGroup {
                ac_id,
                records: vec![record],
            }),
        }
    }

    /// Appends the groups of another export, merging same-id groups.
    pub fn merge(&mut self, other: RawExport) {
        for group in other.groups {
            for record in group.records {
                self.push_record(group.ac_id.clone(), record);
            }
        }
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

/// What a raw column name means.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ColumnKind<'a> {
    /// `<CANDIDATE>_<year>_pct` where the prefix is a real party.
    CandidateShare { candidate: &'a str, year: u16 },
    /// A `_pct` column whose prefix is one of the reserved pseudo-candidates.
    ReservedShare { year: u16 },
    /// `POLLED_<year>`: the polled-count (turnout) column.
    Turnout { year: u16 },
    /// `PS_NO_<year>`: the polling-station number column.
    StationNumber { year: u16 },
    /// Metadata or anything unrecognized.
    Other,
}

/// Classifies a raw column name against the export conventions.
pub fn classify_column(name: &str) -> ColumnKind<'_> {
    for year in ELECTION_YEARS {
        let share_suffix = format!("_{}_pct", year);
        if let Some(candidate) = name.strip_suffix(share_suffix.as_str()) {
            if is_candidate_key(candidate) {
                return ColumnKind::CandidateShare { candidate, year };
            }
            return ColumnKind::ReservedShare { year };
        }
        if name == format!("POLLED_{}", year) {
            return ColumnKind::Turnout { year };
        }
        if name == format!("PS_NO_{}", year) {
            return ColumnKind::StationNumber { year };
        }
    }
    ColumnKind::Other
}

/// A key represents a real candidate when it is not prefixed by any of the
/// reserved pseudo-candidates.
pub fn is_candidate_key(key: &str) -> bool {
    !NON_CANDIDATE_KEYS
        .iter()
        .any(|reserved| key.starts_with(reserved))
}

/// Extracts the assembly id from a group key, e.g. `AC_112_FINAL` -> `112`.
/// Keys not following the convention yield nothing and are skipped upstream.
pub fn parse_group_key(key: &str) -> Option<AssemblyId> {
    key.strip_prefix(GROUP_PREFIX)?
        .strip_suffix(GROUP_SUFFIX)
        .map(AssemblyId::new)
}
