//! State Aggregation Module
//! Sums casualty counts per state.

use crate::data::Incident;
use serde::Serialize;
use std::collections::HashMap;

/// Casualty totals for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "# Killed")]
    pub total_killed: u64,
    #[serde(rename = "# Injured")]
    pub total_injured: u64,
}

impl StateSummary {
    pub fn new(state: impl Into<String>, total_killed: u64, total_injured: u64) -> Self {
        Self {
            state: state.into(),
            total_killed,
            total_injured,
        }
    }
}

/// Groups incidents by state.
pub struct Aggregator;

impl Aggregator {
    /// One summary per distinct state, in the order states first appear.
    pub fn by_state(incidents: &[Incident]) -> Vec<StateSummary> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut summaries: Vec<StateSummary> = Vec::new();

        for incident in incidents {
            let slot = *index.entry(incident.state.as_str()).or_insert_with(|| {
                summaries.push(StateSummary::new(incident.state.as_str(), 0, 0));
                summaries.len() - 1
            });

            let summary = &mut summaries[slot];
            summary.total_killed += incident.n_killed;
            summary.total_injured += incident.n_injured;
        }

        summaries
    }

    /// Total (killed, injured) across summaries.
    pub fn totals(summaries: &[StateSummary]) -> (u64, u64) {
        summaries.iter().fold((0, 0), |(k, i), s| {
            (k + s.total_killed, i + s.total_injured)
        })
    }
}
