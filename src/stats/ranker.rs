//! Top-K state ranking.

use crate::stats::StateSummary;
use std::cmp::Reverse;

pub struct Ranker;

impl Ranker {
    /// Top `k` summaries by killed, then injured, both descending.
    ///
    /// The sort is stable, so equal entries keep their input order.
    pub fn top_k(summaries: &[StateSummary], k: usize) -> Vec<StateSummary> {
        let mut ranked = summaries.to_vec();
        ranked.sort_by_key(|s| (Reverse(s.total_killed), Reverse(s.total_injured)));
        ranked.truncate(k);
        ranked
    }

    /// "A, B, and C" style listing of the ranked state names.
    pub fn describe(ranked: &[StateSummary]) -> String {
        let names: Vec<&str> = ranked.iter().map(|s| s.state.as_str()).collect();
        match names.as_slice() {
            [] => String::new(),
            [only] => only.to_string(),
            [first, second] => format!("{first} and {second}"),
            [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
        }
    }
}
