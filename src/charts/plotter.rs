//! Chart Plotter Module
//! Draws the dashboard tables with egui_plot.

use crate::aggregate::{
    Gender, GenerationCounts, ProfessionCounts, ProfessionGenderCounts, ProvinceGenderTotals,
};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Points, Text};

pub const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
pub const MAP_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

/// Per-gender colors, in `Gender::ALL` order.
pub const GENDER_COLORS: [Color32; 2] = [
    Color32::from_rgb(239, 85, 59),  // Female
    Color32::from_rgb(99, 110, 250), // Male
];

const MIN_BUBBLE_RADIUS: f32 = 3.0;
const MAX_BUBBLE_RADIUS: f32 = 24.0;

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn gender_color(gender: Gender) -> Color32 {
        match gender {
            Gender::Female => GENDER_COLORS[0],
            Gender::Male => GENDER_COLORS[1],
        }
    }

    /// Bubble radius proportional to area, so `total` maps to the square root.
    pub fn bubble_radius(total: u64, max_total: u64) -> f32 {
        if max_total == 0 {
            return MIN_BUBBLE_RADIUS;
        }
        let ratio = (total as f32 / max_total as f32).sqrt();
        MIN_BUBBLE_RADIUS + ratio * (MAX_BUBBLE_RADIUS - MIN_BUBBLE_RADIUS)
    }

    /// Label for a category axis mark; blank between integer positions.
    pub fn category_label(labels: &[String], value: f64) -> String {
        if (value - value.round()).abs() > 1e-6 || value < 0.0 {
            return String::new();
        }
        labels.get(value.round() as usize).cloned().unwrap_or_default()
    }

    /// Horizontal bars of customers per profession.
    pub fn draw_profession_chart(ui: &mut egui::Ui, table: &ProfessionCounts, height: f32) {
        let labels: Vec<String> = table.rows().iter().map(|r| r.profession.clone()).collect();
        let bars: Vec<Bar> = table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(i as f64, row.count as f64)
                    .name(&row.profession)
                    .width(0.7)
            })
            .collect();

        Plot::new("profession_counts")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Customer Count")
            .y_axis_label("Profession")
            .y_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .color(BAR_COLOR)
                        .name("Customer Count"),
                );
            });
    }

    /// Bubble map: one circle per province at (longitude, latitude), sized by
    /// total customers.
    pub fn draw_province_map(
        ui: &mut egui::Ui,
        table: &ProvinceGenderTotals,
        height: f32,
        padding_degrees: f64,
    ) {
        let max_total = table.rows().iter().map(|r| r.total_count).max().unwrap_or(0);

        let mut plot = Plot::new("province_map")
            .height(height)
            .data_aspect(1.0)
            .allow_scroll(false)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude");

        for row in table.rows() {
            plot = plot
                .include_x(row.longitude - padding_degrees)
                .include_x(row.longitude + padding_degrees)
                .include_y(row.latitude - padding_degrees)
                .include_y(row.latitude + padding_degrees);
        }

        plot.show(ui, |plot_ui| {
            for row in table.rows() {
                plot_ui.points(
                    Points::new(vec![[row.longitude, row.latitude]])
                        .radius(Self::bubble_radius(row.total_count, max_total))
                        .filled(true)
                        .color(MAP_COLOR.gamma_multiply(0.6))
                        .name(format!(
                            "{}: {} (Male {}, Female {})",
                            row.province, row.total_count, row.male_count, row.female_count
                        )),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(row.longitude, row.latitude),
                        egui::RichText::new(&row.province).size(10.0),
                    )
                    .color(Color32::DARK_GRAY),
                );
            }
        });
    }

    /// Vertical bars of customers per generation for one profession.
    pub fn draw_generation_chart(ui: &mut egui::Ui, table: &GenerationCounts, height: f32) {
        let labels: Vec<String> = table.rows().iter().map(|r| r.generation.clone()).collect();
        let bars: Vec<Bar> = table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(i as f64, row.count as f64)
                    .name(&row.generation)
                    .width(0.7)
            })
            .collect();

        Plot::new("generation_counts")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Generation")
            .y_axis_label("Customer Count")
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Customer Count"));
            });
    }

    /// Grouped horizontal bars: one bar per gender for each profession.
    pub fn draw_profession_gender_chart(
        ui: &mut egui::Ui,
        table: &ProfessionGenderCounts,
        height: f32,
    ) {
        let order: Vec<String> = table
            .profession_order()
            .into_iter()
            .map(str::to_string)
            .collect();
        let offsets = [-0.2, 0.2];

        let charts: Vec<BarChart> = Gender::ALL
            .iter()
            .zip(offsets)
            .map(|(gender, offset)| {
                let bars: Vec<Bar> = table
                    .rows()
                    .iter()
                    .filter(|row| row.gender == *gender)
                    .filter_map(|row| {
                        let idx = order.iter().position(|p| *p == row.profession)?;
                        Some(
                            Bar::new(idx as f64 + offset, row.count as f64)
                                .name(&row.profession)
                                .width(0.4),
                        )
                    })
                    .collect();
                BarChart::new(bars)
                    .horizontal()
                    .color(Self::gender_color(*gender))
                    .name(gender.as_str())
            })
            .collect();

        Plot::new("profession_gender_counts")
            .height(height)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Customer Count")
            .y_axis_label("Profession")
            .y_axis_formatter(move |mark, _range| Self::category_label(&order, mark.value))
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubble_radius_grows_with_total() {
        let small = ChartPlotter::bubble_radius(1, 100);
        let large = ChartPlotter::bubble_radius(100, 100);
        assert!(small < large);
        assert_eq!(large, MAX_BUBBLE_RADIUS);
        assert_eq!(ChartPlotter::bubble_radius(0, 0), MIN_BUBBLE_RADIUS);
    }

    #[test]
    fn category_labels_only_on_integer_marks() {
        let labels = vec!["Engineer".to_string(), "Teacher".to_string()];
        assert_eq!(ChartPlotter::category_label(&labels, 1.0), "Teacher");
        assert_eq!(ChartPlotter::category_label(&labels, 0.5), "");
        assert_eq!(ChartPlotter::category_label(&labels, 2.0), "");
        assert_eq!(ChartPlotter::category_label(&labels, -1.0), "");
    }
}
