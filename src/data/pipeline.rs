//! Load → project → normalize, run once per process.

use crate::config::DashboardConfig;
use crate::data::{DataError, DataLoader, DataProcessor, IncidentTable};

/// Row accounting for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_missing_coordinates: usize,
    pub rows_malformed_date: usize,
    pub rows_kept: usize,
}

/// Cleaned incidents ready for aggregation and display.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedData {
    pub incidents: IncidentTable,
    pub report: LoadReport,
}

/// Run the cleaning stages against the loader's cached frame.
pub fn prepare_incidents(
    loader: &DataLoader,
    config: &DashboardConfig,
) -> Result<PreparedData, DataError> {
    let frame = loader.load()?;
    let projected = DataProcessor::project(&frame.df, &config.required_columns)?;
    let normalized = DataProcessor::normalize(&projected, config.date_policy)?;

    let rows_kept = normalized.table.len();
    let report = LoadReport {
        rows_read: frame.rows_read,
        rows_missing_coordinates: frame.df.height() - rows_kept - normalized.malformed_dates
            + frame.rows_missing_coordinates(),
        rows_malformed_date: normalized.malformed_dates,
        rows_kept,
    };

    if rows_kept == 0 {
        log::warn!("No incidents survived cleaning of {}", loader.file_path().display());
    } else {
        log::info!(
            "Prepared {} incidents ({} dropped for coordinates, {} for dates)",
            report.rows_kept,
            report.rows_missing_coordinates,
            report.rows_malformed_date
        );
    }

    Ok(PreparedData {
        incidents: normalized.table,
        report,
    })
}
