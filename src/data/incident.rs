//! Incident rows and the immutable table that holds them.

use std::ops::Deref;
use std::sync::Arc;

/// One recorded incident with location, date, and casualty counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub latitude: f64,
    pub longitude: f64,
    pub city_or_county: String,
    pub state: String,
    /// Canonical `MM/DD/YYYY`
    pub date: String,
    pub n_killed: u64,
    pub n_injured: u64,
}

impl Incident {
    /// Layer position, longitude first.
    pub fn position(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Cleaned incidents. Clones share the same rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncidentTable {
    rows: Arc<[Incident]>,
}

impl IncidentTable {
    pub fn new(rows: Vec<Incident>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn rows(&self) -> &[Incident] {
        &self.rows
    }
}

impl Deref for IncidentTable {
    type Target = [Incident];

    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

impl From<Vec<Incident>> for IncidentTable {
    fn from(rows: Vec<Incident>) -> Self {
        Self::new(rows)
    }
}
