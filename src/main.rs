//! Incident Atlas - Gun Violence Incident Map & State Summary Dashboard
//!
//! Loads a static incident table once, then shows the incidents on a map,
//! casualty totals per state, and the states with the most casualties.

mod charts;
mod config;
mod dashboard;
mod data;
mod export;
mod gui;
mod stats;

use config::DashboardConfig;
use dashboard::Dashboard;
use data::{prepare_incidents, DataLoader};
use eframe::egui;
use gui::{AtlasApp, Startup};

fn main() -> eframe::Result<()> {
    pretty_env_logger::init();

    let config = DashboardConfig::default();
    let loader = DataLoader::new(&config.data_path);

    // Load once before the window opens; failures are shown in the window
    let startup = match prepare_incidents(&loader, &config) {
        Ok(prepared) => Startup::Ready(Box::new(Dashboard::derive(prepared, &config))),
        Err(e) => {
            log::error!("Startup load failed: {e}");
            Startup::Failed(e.to_string())
        }
    };

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Incident Atlas"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Incident Atlas",
        options,
        Box::new(|cc| Ok(Box::new(AtlasApp::new(cc, config, startup)))),
    )
}
