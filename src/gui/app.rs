//! Demography Dashboard Main Application
//! Header, control panel and chart grid.

use crate::aggregate::AggregateCache;
use crate::config::DashboardConfig;
use crate::data::{DataLoader, Dataset};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::{RichText, SidePanel, TopBottomPanel};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Complete(Dataset),
    Error(String),
}

/// Main application window.
pub struct DemographyApp {
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    cache: Option<AggregateCache>,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl DemographyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            chart_viewer: ChartViewer::new(config.layout.clone()),
            control_panel: ControlPanel::new(),
            cache: None,
            load_rx: None,
            config,
        };
        app.start_loading();
        app
    }

    /// Load the dataset in a background thread
    fn start_loading(&mut self) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let loader = DataLoader::new(self.config.columns.clone());
        let customers_path = self.config.customers_path.clone();
        let coordinates_path = self.config.coordinates_path.clone();

        thread::spawn(move || {
            let result = match loader.load(&customers_path, &coordinates_path) {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(dataset)) => self.install_dataset(dataset),
            Ok(LoadResult::Error(error)) => {
                log::error!("dataset load failed: {}", error);
                self.control_panel.set_status(&format!("Error: {}", error));
            }
            Err(TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.control_panel
                    .set_status("Error: dataset loader stopped unexpectedly");
            }
        }
    }

    fn install_dataset(&mut self, dataset: Dataset) {
        let professions = dataset.professions().to_vec();
        let (Some(bounds), Some(initial)) = (
            dataset.age_bounds(),
            dataset.default_params(self.config.default_age_range),
        ) else {
            self.control_panel.set_status("Error: dataset has no customers");
            return;
        };

        match AggregateCache::new(dataset) {
            Ok(cache) => {
                self.control_panel.set_choices(professions, bounds, &initial);
                self.cache = Some(cache);
                self.refresh();
            }
            Err(e) => {
                log::error!("aggregation failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Recompute the filtered tables for the current selection
    fn refresh(&mut self) {
        let Some(cache) = self.cache.as_mut() else {
            return;
        };
        let params = self.control_panel.params();
        match cache.snapshot(&params) {
            Ok(tables) => {
                let status = format!(
                    "{} customers, {} professions",
                    cache.dataset().len(),
                    tables.profession_counts.len()
                );
                self.chart_viewer.set_tables(tables);
                self.control_panel.set_status(&status);
            }
            Err(e) => {
                log::warn!("rejected selection {:?}: {}", params, e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DemographyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(5.0);
            ui.label(RichText::new(&self.config.title).size(24.0).strong());
            ui.label(RichText::new(&self.config.description).size(12.0));
            ui.add_space(5.0);
        });

        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                if self.control_panel.show(ui) == ControlPanelAction::ParamsChanged {
                    self.refresh();
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
