//! Derived tables handed to the presentation layer.
//!
//! Each table keeps typed rows and can be viewed as a `DataFrame` with a
//! fixed column schema.

use crate::aggregate::{AgeRange, Gender};
use polars::prelude::*;

/// `ProfessionCounts` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionCount {
    pub profession: String,
    pub count: u64,
}

/// Customers per profession over the whole dataset, ascending by count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfessionCounts {
    rows: Vec<ProfessionCount>,
}

impl ProfessionCounts {
    pub(crate) fn new(rows: Vec<ProfessionCount>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ProfessionCount] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Columns: `profession`, `count`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "profession".into(),
                self.rows.iter().map(|r| r.profession.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "count".into(),
                self.rows.iter().map(|r| r.count).collect::<Vec<_>>(),
            ),
        ])
    }
}

/// `ProvinceGenderTotals` row. Both gender counts are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceGenderTotal {
    pub province: String,
    pub male_count: u64,
    pub female_count: u64,
    pub total_count: u64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Per-province gender totals joined to coordinates.
///
/// Provinces without coordinates are not rows; they are listed in
/// [`dropped_provinces`](Self::dropped_provinces).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvinceGenderTotals {
    rows: Vec<ProvinceGenderTotal>,
    dropped_provinces: Vec<String>,
    dropped_customers: u64,
}

impl ProvinceGenderTotals {
    pub(crate) fn new(
        rows: Vec<ProvinceGenderTotal>,
        dropped_provinces: Vec<String>,
        dropped_customers: u64,
    ) -> Self {
        Self {
            rows,
            dropped_provinces,
            dropped_customers,
        }
    }

    pub fn rows(&self) -> &[ProvinceGenderTotal] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.total_count).sum()
    }

    pub fn get(&self, province: &str) -> Option<&ProvinceGenderTotal> {
        self.rows.iter().find(|r| r.province == province)
    }

    /// Provinces present in the customer table but missing coordinates.
    pub fn dropped_provinces(&self) -> &[String] {
        &self.dropped_provinces
    }

    /// Customers living in dropped provinces.
    pub fn dropped_customers(&self) -> u64 {
        self.dropped_customers
    }

    /// Columns: `province`, `male_count`, `female_count`, `total_count`,
    /// `latitude`, `longitude`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "province".into(),
                self.rows.iter().map(|r| r.province.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "male_count".into(),
                self.rows.iter().map(|r| r.male_count).collect::<Vec<_>>(),
            ),
            Column::new(
                "female_count".into(),
                self.rows.iter().map(|r| r.female_count).collect::<Vec<_>>(),
            ),
            Column::new(
                "total_count".into(),
                self.rows.iter().map(|r| r.total_count).collect::<Vec<_>>(),
            ),
            Column::new(
                "latitude".into(),
                self.rows.iter().map(|r| r.latitude).collect::<Vec<_>>(),
            ),
            Column::new(
                "longitude".into(),
                self.rows.iter().map(|r| r.longitude).collect::<Vec<_>>(),
            ),
        ])
    }
}

/// `GenerationCounts` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationCount {
    pub generation: String,
    pub count: u64,
}

/// Generations among customers of one profession. Absent generations have
/// no row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationCounts {
    profession: String,
    rows: Vec<GenerationCount>,
}

impl GenerationCounts {
    pub(crate) fn new(profession: &str, rows: Vec<GenerationCount>) -> Self {
        Self {
            profession: profession.to_string(),
            rows,
        }
    }

    pub fn profession(&self) -> &str {
        &self.profession
    }

    pub fn rows(&self) -> &[GenerationCount] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn get(&self, generation: &str) -> Option<u64> {
        self.rows
            .iter()
            .find(|r| r.generation == generation)
            .map(|r| r.count)
    }

    /// Columns: `generation`, `count`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "generation".into(),
                self.rows.iter().map(|r| r.generation.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "count".into(),
                self.rows.iter().map(|r| r.count).collect::<Vec<_>>(),
            ),
        ])
    }
}

/// `ProfessionGenderCounts` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionGenderCount {
    pub profession: String,
    pub gender: Gender,
    pub count: u64,
}

/// Long-form (profession, gender) counts within an age range, ascending by
/// count. Zero-count pairs have no row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionGenderCounts {
    age_range: AgeRange,
    rows: Vec<ProfessionGenderCount>,
}

impl ProfessionGenderCounts {
    pub(crate) fn new(age_range: AgeRange, rows: Vec<ProfessionGenderCount>) -> Self {
        Self { age_range, rows }
    }

    pub fn age_range(&self) -> AgeRange {
        self.age_range
    }

    pub fn rows(&self) -> &[ProfessionGenderCount] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn get(&self, profession: &str, gender: Gender) -> Option<u64> {
        self.rows
            .iter()
            .find(|r| r.profession == profession && r.gender == gender)
            .map(|r| r.count)
    }

    /// Professions in order of first appearance in the sorted rows, which is
    /// the category order of the grouped bar chart.
    pub fn profession_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !order.contains(&row.profession.as_str()) {
                order.push(&row.profession);
            }
        }
        order
    }

    /// Columns: `profession`, `gender`, `count`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                "profession".into(),
                self.rows.iter().map(|r| r.profession.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "gender".into(),
                self.rows
                    .iter()
                    .map(|r| r.gender.as_str().to_string())
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "count".into(),
                self.rows.iter().map(|r| r.count).collect::<Vec<_>>(),
            ),
        ])
    }
}

/// All four tables for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardTables {
    pub profession_counts: ProfessionCounts,
    pub province_geography: ProvinceGenderTotals,
    pub generation_counts: GenerationCounts,
    pub profession_gender_counts: ProfessionGenderCounts,
}
