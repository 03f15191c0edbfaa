// ********* Normalized data structures ***********

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The election years covered by the raw exports.
pub const ELECTION_YEARS: [u16; 3] = [2011, 2016, 2021];

/// Identifier of an assembly constituency.
///
/// The raw sources spell the same id in several ways (`"108"`, `"108.0"`,
/// numeric `108`). All spellings collapse to a single canonical decimal form
/// at construction, so membership and filtering anywhere downstream is plain
/// string equality on the canonical form.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssemblyId(String);

impl AssemblyId {
    pub fn new(raw: &str) -> AssemblyId {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            // A float-formatting artifact of an integral id: keep the integer form.
            Ok(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => {
                AssemblyId(format!("{}", x as i64))
            }
            _ => AssemblyId(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssemblyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssemblyId {
    fn from(raw: &str) -> AssemblyId {
        AssemblyId::new(raw)
    }
}

/// Vote shares recorded at one polling station for one election year.
///
/// Shares are in canonical percent units (0-100). A candidate that the
/// source could not report is recorded as 0, indistinguishable from a true
/// zero share.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionResult {
    pub year: u16,
    pub total_votes: f64,
    pub candidates: BTreeMap<String, f64>,
}

impl ElectionResult {
    pub fn empty(year: u16) -> ElectionResult {
        ElectionResult {
            year,
            total_votes: 0.0,
            candidates: BTreeMap::new(),
        }
    }
}

/// One polling station, normalized from a raw export group.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PollingStation {
    pub id: String,
    pub ac_id: AssemblyId,
    pub ac_name: String,
    pub ps_no: String,
    pub ps_name: String,
    pub locality: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    #[serde(rename = "strongestParty")]
    pub strongest_party: String,
    pub election2011: ElectionResult,
    pub election2016: ElectionResult,
    pub election2021: ElectionResult,
}

impl PollingStation {
    /// Both coordinates are present and plottable. Map consumers must filter
    /// on this before placing markers; normalization never rejects a station
    /// for missing coordinates.
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude != 0.0
            && self.longitude != 0.0
    }

    pub fn election(&self, year: u16) -> Option<&ElectionResult> {
        match year {
            2011 => Some(&self.election2011),
            2016 => Some(&self.election2016),
            2021 => Some(&self.election2021),
            _ => None,
        }
    }
}
