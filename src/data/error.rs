use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data unavailable at {}: {source}", .path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Required column '{field}' is missing from the source")]
    SchemaMismatch { field: String },
    #[error("Row {row}: cannot parse date '{value}'")]
    MalformedDate { row: usize, value: String },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}
