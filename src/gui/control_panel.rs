//! Control Panel Widget
//! Left side panel with the dataset summary, the raw data toggle and exports.

use crate::data::LoadReport;
use egui::{Color32, RichText};
use std::path::Path;

/// Left side control panel.
pub struct ControlPanel {
    pub show_raw_data: bool,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            show_raw_data: false,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        data_path: &Path,
        report: Option<&LoadReport>,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🗺 Incident Atlas")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = data_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| data_path.display().to_string());
                ui.label(RichText::new(file_name).size(12.0));

                if let Some(report) = report {
                    ui.add_space(4.0);
                    egui::Grid::new("load_report")
                        .num_columns(2)
                        .spacing([12.0, 2.0])
                        .show(ui, |ui| {
                            for (label, value) in [
                                ("Rows read", report.rows_read),
                                ("Missing coordinates", report.rows_missing_coordinates),
                                ("Unparseable dates", report.rows_malformed_date),
                                ("Incidents kept", report.rows_kept),
                            ] {
                                ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
                                ui.label(RichText::new(value.to_string()).size(11.0));
                                ui.end_row();
                            }
                        });
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Display Section =====
        ui.label(RichText::new("⚙️ Display").size(14.0).strong());
        ui.add_space(5.0);
        ui.add_enabled_ui(report.is_some(), |ui| {
            ui.checkbox(&mut self.show_raw_data, "Show Raw Data");
            if ui.small_button("Reset Map View").clicked() {
                action = ControlPanelAction::ResetView;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(report.is_some(), |ui| {
                let export_button = egui::Button::new(RichText::new("📄 Export Specs").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::ExportSpecs;
                }

                ui.add_space(8.0);

                if ui.button("📋 Copy Specs").clicked() {
                    action = ControlPanelAction::CopySpecs;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") || self.status.contains("Copied") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ResetView,
    ExportSpecs,
    CopySpecs,
}
