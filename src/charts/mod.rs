//! Charts module - Presenter descriptions and chart drawing

mod plotter;
mod spec;

pub use plotter::ChartPlotter;
pub use spec::{BarChartSpec, Category, DeckSpec, Tooltip, ViewState};
