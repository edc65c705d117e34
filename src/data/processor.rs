//! Data Processor Module
//! Handles column projection and row normalization into typed incidents.

use crate::config::DatePolicy;
use crate::data::dates::canonical_date;
use crate::data::{DataError, Incident, IncidentTable};
use polars::prelude::*;

/// Typed incidents plus the rows the normalizer refused.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub table: IncidentTable,
    pub malformed_dates: usize,
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep exactly `fields`, in that order.
    pub fn project<S: AsRef<str>>(df: &DataFrame, fields: &[S]) -> Result<DataFrame, DataError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let fields: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
        if let Some(missing) = fields
            .iter()
            .find(|field| !present.iter().any(|p| p.as_str() == **field))
        {
            return Err(DataError::SchemaMismatch {
                field: missing.to_string(),
            });
        }

        Ok(df.select(fields)?)
    }

    /// Convert a projected frame into incidents with canonical dates.
    ///
    /// Null counts contribute zero and null text becomes empty, so sums
    /// match a null-skipping aggregation.
    pub fn normalize(df: &DataFrame, policy: DatePolicy) -> Result<Normalized, DataError> {
        let lat = Self::float_column(df, "latitude")?;
        let lon = Self::float_column(df, "longitude")?;
        let city = Self::text_column(df, "city_or_county")?;
        let state = Self::text_column(df, "state")?;
        let date = Self::text_column(df, "date")?;
        let killed = Self::count_column(df, "n_killed")?;
        let injured = Self::count_column(df, "n_injured")?;

        let (lat, lon) = (lat.f64()?, lon.f64()?);
        let (city, state, dates) = (city.str()?, state.str()?, date.str()?);
        let (killed, injured) = (killed.i64()?, injured.i64()?);

        let mut rows = Vec::with_capacity(df.height());
        let mut malformed_dates = 0;

        for i in 0..df.height() {
            let (Some(latitude), Some(longitude)) = (lat.get(i), lon.get(i)) else {
                continue;
            };
            if !latitude.is_finite() || !longitude.is_finite() {
                continue;
            }

            let raw_date = dates.get(i).unwrap_or_default();
            let Some(date) = canonical_date(raw_date) else {
                match policy {
                    DatePolicy::Fail => {
                        return Err(DataError::MalformedDate {
                            row: i,
                            value: raw_date.to_string(),
                        })
                    }
                    DatePolicy::SkipRow => {
                        log::debug!("Skipping row {i}: unparseable date '{raw_date}'");
                        malformed_dates += 1;
                        continue;
                    }
                }
            };

            rows.push(Incident {
                latitude,
                longitude,
                city_or_county: city.get(i).unwrap_or_default().to_string(),
                state: state.get(i).unwrap_or_default().to_string(),
                date,
                n_killed: Self::count_at(killed, i),
                n_injured: Self::count_at(injured, i),
            });
        }

        if malformed_dates > 0 {
            log::warn!("Skipped {malformed_dates} rows with unparseable dates");
        }

        Ok(Normalized {
            table: IncidentTable::new(rows),
            malformed_dates,
        })
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Column, DataError> {
        Self::cast_column(df, name, &DataType::Float64)
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Column, DataError> {
        Self::cast_column(df, name, &DataType::String)
    }

    fn count_column(df: &DataFrame, name: &str) -> Result<Column, DataError> {
        Self::cast_column(df, name, &DataType::Int64)
    }

    fn cast_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Column, DataError> {
        let column = df.column(name).map_err(|_| DataError::SchemaMismatch {
            field: name.to_string(),
        })?;
        Ok(column.cast(dtype)?)
    }

    fn count_at(values: &Int64Chunked, i: usize) -> u64 {
        values
            .get(i)
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0)
    }
}
