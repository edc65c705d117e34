//! CSV Data Loader Module
//! Handles CSV file loading and coordinate cleaning using Polars.

use crate::data::DataError;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Rows that survived coordinate cleaning, plus how many were read.
#[derive(Debug)]
pub struct LoadedFrame {
    pub df: DataFrame,
    pub rows_read: usize,
}

impl LoadedFrame {
    pub fn rows_missing_coordinates(&self) -> usize {
        self.rows_read - self.df.height()
    }
}

/// Loads one CSV source exactly once and hands out the shared result.
pub struct DataLoader {
    file_path: PathBuf,
    cache: Mutex<Option<Arc<LoadedFrame>>>,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Get file path.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the source, or return the frame from the first successful load.
    ///
    /// The lock is held across the read so concurrent callers wait for the
    /// first load instead of reading the file again.
    pub fn load(&self) -> Result<Arc<LoadedFrame>, DataError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(frame) = cache.as_ref() {
            log::debug!("Reusing cached frame for {}", self.file_path.display());
            return Ok(Arc::clone(frame));
        }

        let frame = Arc::new(Self::load_csv(&self.file_path)?);
        log::info!(
            "Loaded {} rows from {} ({} without coordinates)",
            frame.rows_read,
            self.file_path.display(),
            frame.rows_missing_coordinates()
        );
        *cache = Some(Arc::clone(&frame));
        Ok(frame)
    }

    /// Read a CSV file and drop rows whose coordinates are missing or unparseable.
    pub fn load_csv(file_path: &Path) -> Result<LoadedFrame, DataError> {
        let unavailable = |source: PolarsError| DataError::DataUnavailable {
            path: file_path.to_path_buf(),
            source,
        };

        let mut lazy = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .with_truncate_ragged_lines(true)
            .with_encoding(CsvEncoding::LossyUtf8)
            .finish()
            .map_err(unavailable)?;

        let schema = lazy.collect_schema().map_err(unavailable)?;
        for field in [LATITUDE, LONGITUDE] {
            if !schema.contains(field) {
                return Err(DataError::SchemaMismatch {
                    field: field.to_string(),
                });
            }
        }

        // Non-strict casts turn unparseable cells into nulls
        let raw = lazy
            .with_columns([
                col(LATITUDE).cast(DataType::Float64),
                col(LONGITUDE).cast(DataType::Float64),
            ])
            .collect()
            .map_err(unavailable)?;
        let rows_read = raw.height();

        let df = raw
            .lazy()
            .filter(
                col(LATITUDE)
                    .is_not_null()
                    .and(col(LONGITUDE).is_not_null()),
            )
            .collect()?;

        Ok(LoadedFrame { df, rows_read })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const SAMPLE: &str = "\
incident_id,date,state,city_or_county,n_killed,n_injured,latitude,longitude
1,2013-01-01,Pennsylvania,Mckeesport,0,4,40.3467,-79.8559
2,2013-01-01,California,Hawthorne,1,3,,-118.333
3,2013-01-01,Ohio,Lorain,1,3,41.4455,
4,2013-01-05,Colorado,Aurora,4,0,39.6518,-104.802
5,2013-01-07,North Carolina,Greensboro,2,2,not-a-number,-79.9561
";

    #[test]
    fn drops_rows_without_coordinates() {
        let file = write_csv(SAMPLE);
        let frame = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(frame.rows_read, 5);
        assert_eq!(frame.df.height(), 2);
        assert_eq!(frame.rows_missing_coordinates(), 3);

        let lat = frame.df.column(LATITUDE).unwrap().f64().unwrap().clone();
        let lon = frame.df.column(LONGITUDE).unwrap().f64().unwrap().clone();
        assert_eq!(lat.null_count(), 0);
        assert_eq!(lon.null_count(), 0);
    }

    #[test]
    fn ragged_row_keeps_its_leading_fields() {
        let file = write_csv(
            "state,latitude,longitude\n\
             Ohio,41.0,-81.0\n\
             Texas,30.0,-97.0,EXTRA\n\
             Iowa,42.0,-93.0\n",
        );
        let frame = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(frame.rows_read, 3);
        assert_eq!(frame.df.height(), 3);
        let states: Vec<Option<&str>> = frame.df.column("state").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(states, vec![Some("Ohio"), Some("Texas"), Some("Iowa")]);
    }

    #[test]
    fn invalid_utf8_cell_is_decoded_lossily() {
        let mut bytes = b"city_or_county,latitude,longitude\nAkron,41.0,-81.5\nBad".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        bytes.extend_from_slice(b"City,30.0,-97.0\nAmes,42.0,-93.6\n");
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();

        let frame = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(frame.rows_read, 3);
        assert_eq!(frame.df.height(), 3);
        let cities = frame.df.column("city_or_county").unwrap().str().unwrap().clone();
        assert_eq!(cities.get(0), Some("Akron"));
        assert!(cities.get(1).unwrap().starts_with("Bad"));
        assert_eq!(cities.get(2), Some("Ames"));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = DataLoader::load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }), "{err}");
    }

    #[test]
    fn missing_coordinate_column_is_schema_mismatch() {
        let file = write_csv("state,latitude\nOhio,41.0\n");
        let err = DataLoader::load_csv(file.path()).unwrap_err();
        match err {
            DataError::SchemaMismatch { field } => assert_eq!(field, LONGITUDE),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_source_yields_empty_frame() {
        let file = write_csv("latitude,longitude,state\n");
        let frame = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(frame.rows_read, 0);
        assert_eq!(frame.df.height(), 0);
    }

    #[test]
    fn second_load_reuses_the_cached_frame() {
        let file = write_csv(SAMPLE);
        let loader = DataLoader::new(file.path());

        let first = loader.load().unwrap();
        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());

        let second = loader.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let loader = DataLoader::new(&path);
        assert!(loader.load().is_err());

        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(loader.load().unwrap().df.height(), 2);
    }
}
