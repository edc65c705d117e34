//! Incident Atlas Main Application
//! Main window with control panel and dashboard view.

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::export::SpecExporter;
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use egui::SidePanel;

/// Outcome of the one-time load at startup.
pub enum Startup {
    Ready(Box<Dashboard>),
    Failed(String),
}

/// Main application window.
pub struct AtlasApp {
    config: DashboardConfig,
    startup: Startup,
    control_panel: ControlPanel,
    dashboard_view: DashboardView,
}

impl AtlasApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        startup: Startup,
    ) -> Self {
        let mut control_panel = ControlPanel::new();
        if let Startup::Failed(error) = &startup {
            control_panel.set_status(format!("Error: {error}"));
        }

        Self {
            config,
            startup,
            control_panel,
            dashboard_view: DashboardView::new(),
        }
    }

    fn dashboard(&self) -> Option<&Dashboard> {
        match &self.startup {
            Startup::Ready(dashboard) => Some(&**dashboard),
            Startup::Failed(_) => None,
        }
    }

    /// Handle spec export - ask for a location and write the JSON bundle
    fn handle_export_specs(&mut self) {
        let Some(dashboard) = self.dashboard() else {
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("incident_atlas_specs.json")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let status = match SpecExporter::write_json(dashboard, &output_path) {
            Ok(()) => format!("Exported specs to {}", output_path.display()),
            Err(e) => {
                log::error!("Spec export failed: {e:#}");
                format!("Error: {e:#}")
            }
        };
        self.control_panel.set_status(status);
    }

    /// Handle spec copy - put the JSON bundle on the clipboard
    fn handle_copy_specs(&mut self, ctx: &egui::Context) {
        let Some(dashboard) = self.dashboard() else {
            return;
        };

        let status = match SpecExporter::to_json(dashboard) {
            Ok(json) => {
                let bytes = json.len();
                ctx.copy_text(json);
                format!("Copied {bytes} bytes of specs")
            }
            Err(e) => format!("Error: {e:#}"),
        };
        self.control_panel.set_status(status);
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let report = self.dashboard().map(|d| d.report);
                    let action =
                        self.control_panel
                            .show(ui, &self.config.data_path, report.as_ref());

                    match action {
                        ControlPanelAction::ResetView => self.dashboard_view.reset_view = true,
                        ControlPanelAction::ExportSpecs => self.handle_export_specs(),
                        ControlPanelAction::CopySpecs => self.handle_copy_specs(ctx),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| match &self.startup {
            Startup::Ready(dashboard) => {
                self.dashboard_view
                    .show(ui, dashboard, self.control_panel.show_raw_data)
            }
            Startup::Failed(error) => DashboardView::show_error(ui, error),
        });
    }
}
