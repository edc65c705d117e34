//! Dashboard View Widget
//! Central scrollable page: map, state bar chart, ranked table and the
//! optional raw incident table.

use crate::charts::ChartPlotter;
use crate::dashboard::{self, Dashboard};
use egui::{Color32, RichText, ScrollArea};

const MAP_HEIGHT: f32 = 480.0;
const RAW_TABLE_HEIGHT: f32 = 400.0;
const SECTION_SPACING: f32 = 15.0;

/// Scrollable dashboard page.
pub struct DashboardView {
    /// Snap the map back to the initial camera on the next frame
    pub reset_view: bool,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self { reset_view: true }
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shown instead of the page when startup failed
    pub fn show_error(ui: &mut egui::Ui, message: &str) {
        ui.centered_and_justified(|ui| {
            ui.label(
                RichText::new(format!("⚠ Unable to load incidents\n\n{message}"))
                    .size(18.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        });
    }

    pub fn show(&mut self, ui: &mut egui::Ui, dashboard: &Dashboard, show_raw_data: bool) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(dashboard::TITLE).size(26.0).strong());
                ui.add_space(6.0);
                ui.label(dashboard::INTRO);
                ui.label(dashboard::MAP_HINT);
                ui.add_space(SECTION_SPACING);

                if dashboard.is_empty() {
                    ui.label(
                        RichText::new("No incidents with coordinates were found in the data source.")
                            .color(Color32::GRAY),
                    );
                    ui.add_space(SECTION_SPACING);
                }

                let config = &dashboard.config;
                ChartPlotter::draw_incident_map(
                    ui,
                    &dashboard.incidents,
                    dashboard.view.as_ref(),
                    &config.map,
                    &dashboard.tooltip,
                    MAP_HEIGHT,
                    self.reset_view,
                );
                self.reset_view = false;

                ui.add_space(SECTION_SPACING);
                ui.separator();
                ui.add_space(SECTION_SPACING);

                ui.heading(dashboard::CHART_HEADER);
                ui.label(dashboard::CHART_HINT);
                ui.label(
                    RichText::new(format!("{} states", dashboard.summaries.len()))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(8.0);
                ChartPlotter::draw_state_bar_chart(
                    ui,
                    &dashboard.bar_chart,
                    config.chart_height as f32,
                );

                ui.add_space(SECTION_SPACING);
                ui.heading(dashboard.top_header());
                ui.label(dashboard.top_sentence());
                ui.add_space(8.0);
                ChartPlotter::draw_summary_table(ui, &dashboard.top_states);

                if show_raw_data {
                    ui.add_space(SECTION_SPACING);
                    ui.heading(format!("Raw Data ({} incidents)", dashboard.incidents.len()));
                    ui.add_space(8.0);
                    ChartPlotter::draw_incident_table(ui, &dashboard.incidents, RAW_TABLE_HEIGHT);
                }

                ui.add_space(SECTION_SPACING);
            });
    }
}
