// Aggregates over a normalized station list: per-candidate performance
// across the covered years, per-year regional statistics and the dashboard
// summary block.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{PollingStation, ELECTION_YEARS};

/// Aggregated vote share of one candidate across the covered years.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePerformance {
    pub name: String,
    pub votes_2011: f64,
    pub votes_2016: f64,
    pub votes_2021: f64,
    /// Share movement between the two most recent elections.
    pub trend: f64,
}

/// Statistics of one election year over the whole station list.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RegionalStats {
    pub year: u16,
    #[serde(rename = "totalVotes")]
    pub total_votes: f64,
    #[serde(rename = "avgTurnout")]
    pub avg_turnout: f64,
    pub winner: String,
    #[serde(rename = "winnerVotes")]
    pub winner_votes: f64,
}

/// The headline block of a report.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(rename = "totalStations")]
    pub total_stations: usize,
    pub constituency: String,
    #[serde(rename = "totalVotes2021")]
    pub total_votes_2021: f64,
    #[serde(rename = "avgTurnout2021")]
    pub avg_turnout_2021: f64,
    #[serde(rename = "winner2021")]
    pub winner_2021: String,
}

/// Mean share per candidate for one year, weighted by each station's polled
/// count. Falls back to a plain mean when no station reported a polled
/// count. A candidate missing from a station's record counts as zero there.
fn year_shares(stations: &[PollingStation], year: u16) -> BTreeMap<String, f64> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for st in stations {
        if let Some(e) = st.election(year) {
            names.extend(e.candidates.keys().map(String::as_str));
        }
    }

    let total_weight: f64 = stations
        .iter()
        .filter_map(|st| st.election(year))
        .map(|e| e.total_votes)
        .sum();

    let mut shares: BTreeMap<String, f64> = BTreeMap::new();
    for name in names {
        let mut weighted = 0.0;
        let mut plain = 0.0;
        let mut count = 0usize;
        for st in stations {
            if let Some(e) = st.election(year) {
                let share = e.candidates.get(name).copied().unwrap_or(0.0);
                weighted += share * e.total_votes;
                plain += share;
                count += 1;
            }
        }
        let mean = if total_weight > 0.0 {
            weighted / total_weight
        } else if count > 0 {
            plain / count as f64
        } else {
            0.0
        };
        shares.insert(name.to_string(), mean);
    }
    shares
}

/// Per-candidate shares across all covered years, sorted by the most recent
/// share, strongest first.
pub fn candidate_performance(stations: &[PollingStation]) -> Vec<CandidatePerformance> {
    let s2011 = year_shares(stations, 2011);
    let s2016 = year_shares(stations, 2016);
    let s2021 = year_shares(stations, 2021);

    let mut names: BTreeSet<&String> = BTreeSet::new();
    names.extend(s2011.keys());
    names.extend(s2016.keys());
    names.extend(s2021.keys());

    let mut perf: Vec<CandidatePerformance> = names
        .into_iter()
        .map(|name| {
            let votes_2011 = s2011.get(name).copied().unwrap_or(0.0);
            let votes_2016 = s2016.get(name).copied().unwrap_or(0.0);
            let votes_2021 = s2021.get(name).copied().unwrap_or(0.0);
            CandidatePerformance {
                name: name.clone(),
                votes_2011,
                votes_2016,
                votes_2021,
                trend: votes_2021 - votes_2016,
            }
        })
        .collect();
    perf.sort_by(|a, b| {
        b.votes_2021
            .partial_cmp(&a.votes_2021)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    debug!("candidate_performance: {} candidates", perf.len());
    perf
}

/// Yearly totals, mean turnout per station and the winning candidate.
pub fn regional_stats(stations: &[PollingStation]) -> Vec<RegionalStats> {
    ELECTION_YEARS
        .iter()
        .map(|&year| {
            let total_votes: f64 = stations
                .iter()
                .filter_map(|st| st.election(year))
                .map(|e| e.total_votes)
                .sum();
            let avg_turnout = if stations.is_empty() {
                0.0
            } else {
                total_votes / stations.len() as f64
            };
            let shares = year_shares(stations, year);
            let (winner, winner_votes) = shares
                .iter()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(name, share)| (name.clone(), *share))
                .unwrap_or_default();
            RegionalStats {
                year,
                total_votes,
                avg_turnout,
                winner,
                winner_votes,
            }
        })
        .collect()
}

pub fn report_summary(stations: &[PollingStation], constituency: &str) -> ReportSummary {
    let stats = regional_stats(stations);
    let latest = stats.iter().find(|s| s.year == 2021);
    ReportSummary {
        total_stations: stations.len(),
        constituency: constituency.to_string(),
        total_votes_2021: latest.map(|s| s.total_votes).unwrap_or(0.0),
        avg_turnout_2021: latest.map(|s| s.avg_turnout).unwrap_or(0.0),
        winner_2021: latest.map(|s| s.winner.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssemblyId, ElectionResult};
    use std::collections::BTreeMap;

    fn station(ps_no: &str, polled: f64, shares_2021: &[(&str, f64)]) -> PollingStation {
        let mut candidates: BTreeMap<String, f64> = BTreeMap::new();
        for (name, share) in shares_2021 {
            candidates.insert(name.to_string(), *share);
        }
        PollingStation {
            id: format!("24_{}", ps_no),
            ac_id: AssemblyId::new("24"),
            ac_name: "NEDUNGADU".to_string(),
            ps_no: ps_no.to_string(),
            ps_name: ps_no.to_string(),
            locality: "POOVAM".to_string(),
            latitude: 10.99,
            longitude: 79.83,
            category: "B".to_string(),
            strongest_party: "AINRC".to_string(),
            election2011: ElectionResult::empty(2011),
            election2016: ElectionResult::empty(2016),
            election2021: ElectionResult {
                year: 2021,
                total_votes: polled,
                candidates,
            },
        }
    }

    #[test]
    fn performance_is_turnout_weighted() {
        let stations = vec![
            station("1", 300.0, &[("AINRC", 60.0), ("INC", 40.0)]),
            station("2", 100.0, &[("AINRC", 20.0), ("INC", 80.0)]),
        ];
        let perf = candidate_performance(&stations);
        // (60*300 + 20*100) / 400 = 50, (40*300 + 80*100) / 400 = 50.
        assert_eq!(perf.len(), 2);
        assert!((perf[0].votes_2021 - 50.0).abs() < 1e-9);
        assert!((perf[1].votes_2021 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn performance_plain_mean_without_turnout() {
        let stations = vec![
            station("1", 0.0, &[("AINRC", 60.0)]),
            station("2", 0.0, &[("AINRC", 20.0)]),
        ];
        let perf = candidate_performance(&stations);
        assert_eq!(perf[0].name, "AINRC");
        assert!((perf[0].votes_2021 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn performance_sorted_by_latest_share() {
        let stations = vec![station(
            "1",
            200.0,
            &[("INC", 30.0), ("AINRC", 50.0), ("NR_CONGRESS", 20.0)],
        )];
        let perf = candidate_performance(&stations);
        let names: Vec<&str> = perf.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["AINRC", "INC", "NR_CONGRESS"]);
    }

    #[test]
    fn regional_stats_yearly_blocks() {
        let stations = vec![
            station("1", 300.0, &[("AINRC", 60.0), ("INC", 40.0)]),
            station("2", 100.0, &[("AINRC", 30.0), ("INC", 70.0)]),
        ];
        let stats = regional_stats(&stations);
        assert_eq!(stats.len(), 3);
        let latest = stats.iter().find(|s| s.year == 2021).unwrap();
        assert_eq!(latest.total_votes, 400.0);
        assert_eq!(latest.avg_turnout, 200.0);
        // AINRC: (60*300 + 30*100) / 400 = 52.5 beats INC at 47.5.
        assert_eq!(latest.winner, "AINRC");
        assert!((latest.winner_votes - 52.5).abs() < 1e-9);
    }

    #[test]
    fn summary_over_empty_list() {
        let summary = report_summary(&[], "Nedungadu (SC)");
        assert_eq!(summary.total_stations, 0);
        assert_eq!(summary.total_votes_2021, 0.0);
        assert_eq!(summary.winner_2021, "");
    }

    #[test]
    fn summary_headlines() {
        let stations = vec![station("1", 500.0, &[("AINRC", 55.0), ("INC", 45.0)])];
        let summary = report_summary(&stations, "Nedungadu (SC)");
        assert_eq!(summary.total_stations, 1);
        assert_eq!(summary.total_votes_2021, 500.0);
        assert_eq!(summary.winner_2021, "AINRC");
        assert_eq!(summary.constituency, "Nedungadu (SC)");
    }
}
