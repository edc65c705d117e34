//! Dashboard Configuration Module
//! Compiled defaults for the data source, cleaning policy, and presentation.

use std::path::PathBuf;

/// Columns retained after load, in display order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "latitude",
    "longitude",
    "city_or_county",
    "state",
    "date",
    "n_killed",
    "n_injured",
];

/// Number of states shown in the top summary table.
pub const TOP_STATES: usize = 5;

/// What to do with a row whose date cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    /// Drop the row and count it in the load report
    SkipRow,
    /// Abort the whole load
    Fail,
}

impl Default for DatePolicy {
    fn default() -> Self {
        DatePolicy::SkipRow
    }
}

/// Fixed styling of the incident map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapStyle {
    /// RGBA fill of every incident point
    pub fill_color: [u8; 4],
    /// Point radius in meters, as handed to the layer description
    pub radius_m: f64,
    /// Point radius in screen pixels for the in-window map
    pub point_px: f32,
    pub zoom: f64,
    pub pitch: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            fill_color: [255, 0, 0, 160],
            radius_m: 500.0,
            point_px: 1.5,
            zoom: 4.0,
            pitch: 0.0,
        }
    }
}

/// Dashboard settings.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub required_columns: Vec<String>,
    pub date_policy: DatePolicy,
    pub top_k: usize,
    pub map: MapStyle,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            required_columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            date_policy: DatePolicy::default(),
            top_k: TOP_STATES,
            map: MapStyle::default(),
            chart_width: 600,
            chart_height: 400,
        }
    }
}
