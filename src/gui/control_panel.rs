//! Control Panel Widget
//! Left side panel with the profession selector and the age range sliders.

use crate::aggregate::{AgeRange, FilterParams};
use egui::{Color32, ComboBox, RichText};

/// Left side control panel holding the current filter selection.
pub struct ControlPanel {
    pub professions: Vec<String>,
    pub profession: String,
    pub age_bounds: AgeRange,
    pub age_min: u32,
    pub age_max: u32,
    pub status: String,
    pub enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            professions: Vec::new(),
            profession: String::new(),
            age_bounds: AgeRange { min: 0, max: 0 },
            age_min: 0,
            age_max: 0,
            status: "Loading dataset...".to_string(),
            enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the widgets after the dataset has loaded.
    pub fn set_choices(&mut self, professions: Vec<String>, bounds: AgeRange, initial: &FilterParams) {
        self.professions = professions;
        self.age_bounds = bounds;
        self.profession = initial.profession.clone();
        self.age_min = initial.age_range.min;
        self.age_max = initial.age_range.max;
        self.enabled = true;
    }

    /// Current selection, unvalidated.
    pub fn params(&self) -> FilterParams {
        FilterParams {
            profession: self.profession.clone(),
            age_range: AgeRange {
                min: self.age_min,
                max: self.age_max,
            },
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.label(RichText::new("Filters").size(14.0).strong());
        ui.add_space(8.0);

        ui.add_enabled_ui(self.enabled, |ui| {
            ui.label("Select Profession");
            ComboBox::from_id_salt("profession")
                .width(200.0)
                .selected_text(&self.profession)
                .show_ui(ui, |ui| {
                    for profession in &self.professions {
                        if ui
                            .selectable_label(self.profession == *profession, profession)
                            .clicked()
                        {
                            self.profession = profession.clone();
                            action = ControlPanelAction::ParamsChanged;
                        }
                    }
                });

            ui.add_space(12.0);
            ui.label("Select age range");

            let bounds = self.age_bounds.min..=self.age_bounds.max;
            let min_changed = ui
                .add(egui::Slider::new(&mut self.age_min, bounds.clone()).text("from"))
                .changed();
            let max_changed = ui
                .add(egui::Slider::new(&mut self.age_max, bounds).text("to"))
                .changed();
            if min_changed || max_changed {
                action = ControlPanelAction::ParamsChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ParamsChanged,
}
