//! Chart Plotter Module
//! Draws the incident map, the stacked state bars and the summary tables
//! using egui_plot.

use crate::charts::{BarChartSpec, Category, Tooltip, ViewState};
use crate::config::MapStyle;
use crate::data::{Incident, IncidentTable};
use crate::stats::StateSummary;
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotBounds, PlotPoints, Points};
use rayon::prelude::*;
use std::collections::HashMap;

/// Series name of the incident points; the tooltip only fires for it.
const INCIDENT_SERIES: &str = "Incidents";

/// Bar colors per category, killed first
pub const CATEGORY_COLORS: [Color32; 2] = [
    Color32::from_rgb(76, 120, 168),  // Blue
    Color32::from_rgb(245, 133, 24), // Orange
];

const TABLE_TEXT: f32 = 11.0;

/// Draws dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn fill_color(style: &MapStyle) -> Color32 {
        let [r, g, b, a] = style.fill_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    /// Incident closest to a plot coordinate.
    pub fn nearest_incident(incidents: &[Incident], lon: f64, lat: f64) -> Option<&Incident> {
        incidents.iter().min_by(|a, b| {
            let da = (a.longitude - lon).powi(2) + (a.latitude - lat).powi(2);
            let db = (b.longitude - lon).powi(2) + (b.latitude - lat).powi(2);
            da.total_cmp(&db)
        })
    }

    /// Bounds showing the camera's center at its zoom level.
    pub fn view_bounds(view: &ViewState, width_px: f64, height_px: f64) -> PlotBounds {
        let (lon_span, lat_span) = view.span(width_px, height_px);
        PlotBounds::from_min_max(
            [view.longitude - lon_span / 2.0, view.latitude - lat_span / 2.0],
            [view.longitude + lon_span / 2.0, view.latitude + lat_span / 2.0],
        )
    }

    /// Draw the incident scatter map.
    /// X-axis: longitude, Y-axis: latitude
    ///
    /// When `reset_view` is set the plot snaps to the camera; afterwards the
    /// user pans and zooms freely.
    pub fn draw_incident_map(
        ui: &mut egui::Ui,
        incidents: &IncidentTable,
        view: Option<&ViewState>,
        style: &MapStyle,
        tooltip: &Tooltip,
        height: f32,
        reset_view: bool,
    ) {
        let width = ui.available_width() as f64;
        let positions: Vec<[f64; 2]> = incidents.par_iter().map(Incident::position).collect();

        let lookup = incidents.clone();
        let tooltip = tooltip.clone();

        Plot::new("incident_map")
            .height(height)
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .allow_scroll(false)
            .label_formatter(move |name, value| {
                if name != INCIDENT_SERIES {
                    return String::new();
                }
                Self::nearest_incident(&lookup, value.x, value.y)
                    .map(|incident| tooltip.render(incident))
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                if reset_view {
                    if let Some(view) = view {
                        plot_ui.set_plot_bounds(Self::view_bounds(view, width, height as f64));
                    }
                }

                plot_ui.points(
                    Points::new(PlotPoints::from(positions))
                        .radius(style.point_px)
                        .color(Self::fill_color(style))
                        .name(INCIDENT_SERIES),
                );
            });
    }

    /// Draw killed and injured per state as stacked bars.
    /// X-axis: states, Y-axis: count
    pub fn draw_state_bar_chart(ui: &mut egui::Ui, spec: &BarChartSpec, height: f32) {
        let x_labels: Vec<String> = spec.states().into_iter().map(String::from).collect();
        let positions: HashMap<&str, usize> = x_labels
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_str(), i))
            .collect();

        let mut charts: Vec<BarChart> = Vec::new();
        for (category, color) in Category::ALL.into_iter().zip(CATEGORY_COLORS) {
            let bars: Vec<Bar> = spec
                .data
                .values
                .iter()
                .filter(|row| row.category == category)
                .filter_map(|row| {
                    let x = *positions.get(row.state.as_str())? as f64;
                    Some(Bar::new(x, row.count as f64).name(&row.state).width(0.7))
                })
                .collect();

            let label = category.label();
            let below: Vec<&BarChart> = charts.iter().collect();
            let chart = BarChart::new(bars)
                .name(label)
                .color(color)
                .element_formatter(Box::new(move |bar, _chart| {
                    format!(
                        "State: {}\nCategory: {}\nCount: {}",
                        bar.name, label, bar.value
                    )
                }))
                .stack_on(&below);
            charts.push(chart);
        }

        Plot::new("state_bars")
            .height(height)
            .legend(Legend::default())
            .x_axis_label("State")
            .y_axis_label("Count")
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                x_labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }

    /// Draw the ranked state table
    pub fn draw_summary_table(ui: &mut egui::Ui, ranked: &[StateSummary]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("top_states_table")
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("#").strong().size(TABLE_TEXT));
                        ui.label(RichText::new("State").strong().size(TABLE_TEXT));
                        ui.label(RichText::new(Category::Killed.label()).strong().size(TABLE_TEXT));
                        ui.label(RichText::new(Category::Injured.label()).strong().size(TABLE_TEXT));
                        ui.end_row();

                        for (rank, summary) in ranked.iter().enumerate() {
                            ui.label(RichText::new((rank + 1).to_string()).size(TABLE_TEXT));
                            ui.label(RichText::new(&summary.state).size(TABLE_TEXT));
                            ui.label(RichText::new(summary.total_killed.to_string()).size(TABLE_TEXT));
                            ui.label(RichText::new(summary.total_injured.to_string()).size(TABLE_TEXT));
                            ui.end_row();
                        }
                    });
            });
    }

    /// Draw every cleaned incident, virtualized by row.
    pub fn draw_incident_table(ui: &mut egui::Ui, incidents: &IncidentTable, max_height: f32) {
        const HEADERS: [&str; 7] = [
            "latitude",
            "longitude",
            "city_or_county",
            "state",
            "date",
            "n_killed",
            "n_injured",
        ];
        const WIDTHS: [f32; 7] = [80.0, 90.0, 180.0, 130.0, 90.0, 70.0, 70.0];

        let row_height = ui.text_style_height(&egui::TextStyle::Body) + 4.0;

        ui.horizontal(|ui| {
            for (header, width) in HEADERS.iter().zip(WIDTHS) {
                ui.add_sized([width, row_height], egui::Label::new(RichText::new(*header).strong()));
            }
        });
        ui.separator();

        ScrollArea::vertical()
            .id_salt("raw_incidents")
            .max_height(max_height)
            .auto_shrink([false, true])
            .show_rows(ui, row_height, incidents.len(), |ui, row_range| {
                for incident in &incidents.rows()[row_range] {
                    let cells = [
                        format!("{:.4}", incident.latitude),
                        format!("{:.4}", incident.longitude),
                        incident.city_or_county.clone(),
                        incident.state.clone(),
                        incident.date.clone(),
                        incident.n_killed.to_string(),
                        incident.n_injured.to_string(),
                    ];
                    ui.horizontal(|ui| {
                        for (cell, width) in cells.into_iter().zip(WIDTHS) {
                            ui.add_sized([width, row_height], egui::Label::new(cell).truncate());
                        }
                    });
                }
            });
    }
}
