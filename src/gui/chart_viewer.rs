//! Chart Viewer Widget
//! Central panel laying out the four dashboard charts in two rows.

use crate::aggregate::DashboardTables;
use crate::charts::ChartPlotter;
use crate::config::LayoutConfig;
use egui::{RichText, ScrollArea};

/// Scrollable two-by-two chart grid.
pub struct ChartViewer {
    pub tables: Option<DashboardTables>,
    layout: LayoutConfig,
}

impl ChartViewer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            tables: None,
            layout,
        }
    }

    pub fn set_tables(&mut self, tables: DashboardTables) {
        self.tables = Some(tables);
    }

    /// Caption under the map naming provinces that could not be placed.
    pub fn dropped_caption(tables: &DashboardTables) -> Option<String> {
        let geography = &tables.province_geography;
        if geography.dropped_provinces().is_empty() {
            return None;
        }
        Some(format!(
            "{} customers in {} not shown (no coordinates)",
            geography.dropped_customers(),
            geography.dropped_provinces().join(", ")
        ))
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(tables) = &self.tables else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };
        let height = self.layout.chart_height;
        let padding = self.layout.map_padding_degrees;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.columns(2, |columns| {
                    columns[0].label(
                        RichText::new("Customer Profession Landscape").size(16.0).strong(),
                    );
                    ChartPlotter::draw_profession_chart(
                        &mut columns[0],
                        &tables.profession_counts,
                        height,
                    );

                    columns[1].label(RichText::new("Customer Count across Indonesia").size(16.0).strong());
                    ChartPlotter::draw_province_map(
                        &mut columns[1],
                        &tables.province_geography,
                        height,
                        padding,
                    );
                    if let Some(caption) = Self::dropped_caption(tables) {
                        columns[1].label(RichText::new(caption).size(11.0).weak());
                    }
                });

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                ui.columns(2, |columns| {
                    columns[0].label(
                        RichText::new(format!(
                            "Customer Demographics: Generation-wise Distribution of Profession {}",
                            tables.generation_counts.profession()
                        ))
                        .size(14.0)
                        .strong(),
                    );
                    ChartPlotter::draw_generation_chart(
                        &mut columns[0],
                        &tables.generation_counts,
                        height,
                    );

                    columns[1].label(
                        RichText::new(format!(
                            "Multivariate: Gender per Profession, Age {}",
                            tables.profession_gender_counts.age_range()
                        ))
                        .size(14.0)
                        .strong(),
                    );
                    ChartPlotter::draw_profession_gender_chart(
                        &mut columns[1],
                        &tables.profession_gender_counts,
                        height,
                    );
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{AgeRange, Aggregator, FilterParams};
    use crate::data::{CustomerRecord, Dataset, ProvinceCoordinate};

    #[test]
    fn caption_names_dropped_provinces() {
        let dataset = Dataset::from_records(
            &[
                CustomerRecord::new("Engineer", "Jakarta", "Male", 30, "Millennial"),
                CustomerRecord::new("Teacher", "Bali", "Male", 25, "Gen Z"),
            ],
            &[ProvinceCoordinate::new("Jakarta", -6.2, 106.8)],
        )
        .unwrap();
        let tables = Aggregator::compute_snapshot(
            &dataset,
            &FilterParams::new("Teacher", AgeRange { min: 25, max: 30 }),
        )
        .unwrap();

        assert_eq!(
            ChartViewer::dropped_caption(&tables).as_deref(),
            Some("1 customers in Bali not shown (no coordinates)")
        );
    }
}
