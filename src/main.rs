//! Customer Demography Dashboard
//!
//! Loads the customer dataset and shows demographic charts filtered by
//! profession and age range.

use anyhow::Context;
use demography::config::DashboardConfig;
use demography::gui::DemographyApp;
use eframe::egui;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => DashboardConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    config.validate().context("invalid dashboard config")?;
    log::info!(
        "starting dashboard with {} and {}",
        config.customers_path.display(),
        config.coordinates_path.display()
    );

    // Configure native options
    let layout = &config.layout;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([layout.window_width, layout.window_height])
            .with_min_inner_size([layout.min_width, layout.min_height])
            .with_title(config.title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        "Customer Demography Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DemographyApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {}", e))
}
