//! Stats module - per-state aggregation and ranking

mod aggregator;
mod ranker;

pub use aggregator::{Aggregator, StateSummary};
pub use ranker::Ranker;

#[cfg(test)]
pub(crate) use aggregator::tests::incident;
