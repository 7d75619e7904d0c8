//! Aggregation Calculator Module
//! Pure functions turning the customer and coordinate tables into the
//! dashboard's derived tables.

use crate::aggregate::category::{GenderCrossTab, ZeroFill};
use crate::aggregate::params::{AgeRange, FilterParams};
use crate::aggregate::tables::{
    DashboardTables, GenerationCount, GenerationCounts, ProfessionCount, ProfessionCounts,
    ProfessionGenderCount, ProfessionGenderCounts, ProvinceGenderTotal, ProvinceGenderTotals,
};
use crate::aggregate::Gender;
use crate::data::{
    DataProcessor, Dataset, GENDER, GENERATION, LATITUDE, LONGITUDE, PROFESSION, PROVINCE,
};
use polars::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Data validation failed: {0}")]
    DataValidation(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Computes the derived tables. Holds no state; every call recomputes from
/// its inputs.
pub struct Aggregator;

impl Aggregator {
    /// Customers per profession over the full table, ascending by count with
    /// ties in lexical profession order.
    pub fn profession_counts(customers: &DataFrame) -> Result<ProfessionCounts, AggregateError> {
        let grouped = DataProcessor::count_by(customers, &[PROFESSION])?;
        let professions = DataProcessor::str_column(&grouped, PROFESSION)?;
        let counts = DataProcessor::count_column(&grouped)?;

        let mut rows: Vec<ProfessionCount> = professions
            .into_iter()
            .zip(counts)
            .map(|(profession, count)| {
                non_null(profession, PROFESSION)
                    .map(|profession| ProfessionCount { profession, count })
            })
            .collect::<Result<_, AggregateError>>()?;
        rows.sort_by(|a, b| {
            a.count
                .cmp(&b.count)
                .then_with(|| a.profession.cmp(&b.profession))
        });

        log::debug!("profession counts: {} professions", rows.len());
        Ok(ProfessionCounts::new(rows))
    }

    /// Male/female counts per province, zero-filled, inner-joined to the
    /// coordinate table.
    ///
    /// Provinces without coordinates are dropped and reported on the result.
    pub fn province_geography(
        customers: &DataFrame,
        coordinates: &DataFrame,
    ) -> Result<ProvinceGenderTotals, AggregateError> {
        let grouped = DataProcessor::count_by(customers, &[PROVINCE, GENDER])?;
        let crosstab = GenderCrossTab::from_counts(&grouped, PROVINCE)?;
        let lookup = coordinate_lookup(coordinates)?;

        let mut rows: Vec<ProvinceGenderTotal> = Vec::new();
        let mut dropped_provinces: Vec<String> = Vec::new();
        let mut dropped_customers = 0u64;

        for (province, counts) in crosstab.wide(ZeroFill::Fill) {
            let (Some(&male_count), Some(&female_count)) =
                (counts.get(&Gender::Male), counts.get(&Gender::Female))
            else {
                return Err(AggregateError::DataValidation(format!(
                    "province \"{}\" is missing a gender count",
                    province
                )));
            };
            let total_count = male_count + female_count;

            match lookup.get(&province) {
                Some(&(latitude, longitude)) => rows.push(ProvinceGenderTotal {
                    province,
                    male_count,
                    female_count,
                    total_count,
                    latitude,
                    longitude,
                }),
                None => {
                    dropped_provinces.push(province);
                    dropped_customers += total_count;
                }
            }
        }

        if !dropped_provinces.is_empty() {
            log::warn!(
                "{} provinces ({} customers) have no coordinates and are left off the map: {}",
                dropped_provinces.len(),
                dropped_customers,
                dropped_provinces.join(", ")
            );
        }
        log::debug!("province geography: {} provinces", rows.len());

        Ok(ProvinceGenderTotals::new(
            rows,
            dropped_provinces,
            dropped_customers,
        ))
    }

    /// Generations among customers of `profession`. Generations without a
    /// matching customer are absent.
    pub fn generation_counts(
        customers: &DataFrame,
        profession: &str,
    ) -> Result<GenerationCounts, AggregateError> {
        let known = DataProcessor::unique_values(customers, PROFESSION)?;
        if known.binary_search_by(|p| p.as_str().cmp(profession)).is_err() {
            return Err(AggregateError::InvalidParameter(format!(
                "unknown profession \"{}\"",
                profession
            )));
        }

        let filtered = DataProcessor::filter_by_profession(customers, profession)?;
        let grouped = DataProcessor::count_by(&filtered, &[GENERATION])?;
        let generations = DataProcessor::str_column(&grouped, GENERATION)?;
        let counts = DataProcessor::count_column(&grouped)?;

        let mut rows: Vec<GenerationCount> = generations
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(generation, count)| {
                non_null(generation, GENERATION)
                    .map(|generation| GenerationCount { generation, count })
            })
            .collect::<Result<_, AggregateError>>()?;
        rows.sort_by(|a, b| a.generation.cmp(&b.generation));

        log::debug!(
            "generation counts for {}: {} generations",
            profession,
            rows.len()
        );
        Ok(GenerationCounts::new(profession, rows))
    }

    /// (profession, gender) counts among customers aged `age_min..=age_max`,
    /// long form without zero-count pairs, ascending by count.
    pub fn profession_gender_counts(
        customers: &DataFrame,
        age_min: u32,
        age_max: u32,
    ) -> Result<ProfessionGenderCounts, AggregateError> {
        let range = AgeRange::new(age_min, age_max)?;
        let filtered = DataProcessor::filter_by_age_range(customers, range.min, range.max)?;
        let grouped = DataProcessor::count_by(&filtered, &[PROFESSION, GENDER])?;
        let crosstab = GenderCrossTab::from_counts(&grouped, PROFESSION)?;

        let mut rows: Vec<ProfessionGenderCount> = crosstab
            .melt(ZeroFill::Omit)
            .into_iter()
            .map(|(profession, gender, count)| ProfessionGenderCount {
                profession,
                gender,
                count,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.count
                .cmp(&b.count)
                .then_with(|| a.profession.cmp(&b.profession))
                .then_with(|| a.gender.cmp(&b.gender))
        });

        log::debug!(
            "profession/gender counts for ages {}: {} rows from {} customers",
            range,
            rows.len(),
            filtered.height()
        );
        Ok(ProfessionGenderCounts::new(range, rows))
    }

    /// Validate `params` against `dataset` and compute all four tables.
    pub fn compute_snapshot(
        dataset: &Dataset,
        params: &FilterParams,
    ) -> Result<DashboardTables, AggregateError> {
        params.validate(dataset)?;
        let customers = dataset.customers();

        let ((profession_counts, province_geography), (generation_counts, profession_gender_counts)) =
            rayon::join(
                || {
                    rayon::join(
                        || Self::profession_counts(customers),
                        || Self::province_geography(customers, dataset.coordinates()),
                    )
                },
                || {
                    rayon::join(
                        || Self::generation_counts(customers, &params.profession),
                        || {
                            Self::profession_gender_counts(
                                customers,
                                params.age_range.min,
                                params.age_range.max,
                            )
                        },
                    )
                },
            );

        Ok(DashboardTables {
            profession_counts: profession_counts?,
            province_geography: province_geography?,
            generation_counts: generation_counts?,
            profession_gender_counts: profession_gender_counts?,
        })
    }
}

/// Group keys come from required columns; a null one means the frame was
/// not validated.
fn non_null(value: Option<&str>, column: &str) -> Result<String, AggregateError> {
    value.map(str::to_string).ok_or_else(|| {
        AggregateError::DataValidation(format!("null {} in customer table", column))
    })
}

/// Province -> (latitude, longitude). Rows with a null coordinate are left
/// out, so they behave like a missing key.
fn coordinate_lookup(coordinates: &DataFrame) -> Result<HashMap<String, (f64, f64)>, AggregateError> {
    let provinces = DataProcessor::str_column(coordinates, PROVINCE)?;
    let latitudes = DataProcessor::f64_column(coordinates, LATITUDE)?;
    let longitudes = DataProcessor::f64_column(coordinates, LONGITUDE)?;

    Ok(provinces
        .into_iter()
        .zip(latitudes)
        .zip(longitudes)
        .filter_map(|((province, lat), lon)| Some((province?.to_string(), (lat?, lon?))))
        .collect())
}
