//! Data module - CSV loading, projection and normalization

pub mod dates;
mod error;
mod incident;
mod loader;
mod pipeline;
mod processor;

pub use error::DataError;
pub use incident::{Incident, IncidentTable};
pub use loader::DataLoader;
pub use pipeline::{prepare_incidents, LoadReport, PreparedData};
pub use processor::DataProcessor;
