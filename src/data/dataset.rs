//! Dataset Module
//! Immutable customer and province coordinate tables for one dashboard session.

use crate::aggregate::{AgeRange, FilterParams};
use crate::data::loader::LoaderError;
use crate::data::processor::DataProcessor;
use polars::prelude::*;
use std::collections::HashSet;

pub const PROFESSION: &str = "profession";
pub const PROVINCE: &str = "province";
pub const GENDER: &str = "gender";
pub const AGE: &str = "age";
pub const GENERATION: &str = "generation";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

pub const CUSTOMER_COLUMNS: [&str; 5] = [PROFESSION, PROVINCE, GENDER, AGE, GENERATION];
pub const COORDINATE_COLUMNS: [&str; 3] = [PROVINCE, LATITUDE, LONGITUDE];

/// One row of the customer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub profession: String,
    pub province: String,
    pub gender: String,
    pub age: u32,
    pub generation: String,
}

impl CustomerRecord {
    pub fn new(
        profession: &str,
        province: &str,
        gender: &str,
        age: u32,
        generation: &str,
    ) -> Self {
        Self {
            profession: profession.to_string(),
            province: province.to_string(),
            gender: gender.to_string(),
            age,
            generation: generation.to_string(),
        }
    }
}

/// Geographic centre of a province.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceCoordinate {
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ProvinceCoordinate {
    pub fn new(province: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            province: province.to_string(),
            latitude,
            longitude,
        }
    }
}

/// Build a customer frame with the canonical column schema.
pub fn customers_frame(records: &[CustomerRecord]) -> PolarsResult<DataFrame> {
    let mut professions: Vec<String> = Vec::with_capacity(records.len());
    let mut provinces: Vec<String> = Vec::with_capacity(records.len());
    let mut genders: Vec<String> = Vec::with_capacity(records.len());
    let mut ages: Vec<i64> = Vec::with_capacity(records.len());
    let mut generations: Vec<String> = Vec::with_capacity(records.len());

    for record in records {
        professions.push(record.profession.clone());
        provinces.push(record.province.clone());
        genders.push(record.gender.clone());
        ages.push(i64::from(record.age));
        generations.push(record.generation.clone());
    }

    DataFrame::new(vec![
        Column::new(PROFESSION.into(), professions),
        Column::new(PROVINCE.into(), provinces),
        Column::new(GENDER.into(), genders),
        Column::new(AGE.into(), ages),
        Column::new(GENERATION.into(), generations),
    ])
}

/// Build a coordinate frame with the canonical column schema.
pub fn coordinates_frame(coordinates: &[ProvinceCoordinate]) -> PolarsResult<DataFrame> {
    let provinces: Vec<String> = coordinates.iter().map(|c| c.province.clone()).collect();
    let latitudes: Vec<f64> = coordinates.iter().map(|c| c.latitude).collect();
    let longitudes: Vec<f64> = coordinates.iter().map(|c| c.longitude).collect();

    DataFrame::new(vec![
        Column::new(PROVINCE.into(), provinces),
        Column::new(LATITUDE.into(), latitudes),
        Column::new(LONGITUDE.into(), longitudes),
    ])
}

/// Customer and coordinate tables plus the categories observed in them.
///
/// Constructed once per session and never mutated; every aggregation reads
/// from the same snapshot.
#[derive(Debug, Clone)]
pub struct Dataset {
    customers: DataFrame,
    coordinates: DataFrame,
    professions: Vec<String>,
    age_bounds: Option<AgeRange>,
}

impl Dataset {
    /// Wrap already-materialized frames, checking the canonical schema, the
    /// absence of nulls in required columns and the uniqueness of province
    /// coordinates.
    pub fn new(customers: DataFrame, coordinates: DataFrame) -> Result<Self, LoaderError> {
        require_columns(&customers, "customers", &CUSTOMER_COLUMNS)?;
        require_columns(&coordinates, "coordinates", &COORDINATE_COLUMNS)?;

        let mut seen: HashSet<&str> = HashSet::new();
        for province in DataProcessor::str_column(&coordinates, PROVINCE)?
            .into_iter()
            .flatten()
        {
            if !seen.insert(province) {
                return Err(LoaderError::DuplicateProvince(province.to_string()));
            }
        }

        let professions = DataProcessor::unique_values(&customers, PROFESSION)?;

        let ages = customers.column(AGE)?.cast(&DataType::Int64)?;
        let ages = ages.i64()?;
        let age_bounds = match (ages.min(), ages.max()) {
            (Some(min), Some(max)) => {
                let min = u32::try_from(min).map_err(|_| LoaderError::InvalidAge(min))?;
                let max = u32::try_from(max).map_err(|_| LoaderError::InvalidAge(max))?;
                Some(AgeRange { min, max })
            }
            _ => None,
        };

        log::debug!(
            "dataset: {} customers, {} professions, {} provinces with coordinates",
            customers.height(),
            professions.len(),
            coordinates.height()
        );

        Ok(Self {
            customers,
            coordinates,
            professions,
            age_bounds,
        })
    }

    /// Build a dataset from typed rows.
    pub fn from_records(
        customers: &[CustomerRecord],
        coordinates: &[ProvinceCoordinate],
    ) -> Result<Self, LoaderError> {
        Self::new(customers_frame(customers)?, coordinates_frame(coordinates)?)
    }

    pub fn customers(&self) -> &DataFrame {
        &self.customers
    }

    pub fn coordinates(&self) -> &DataFrame {
        &self.coordinates
    }

    /// Distinct professions, sorted.
    pub fn professions(&self) -> &[String] {
        &self.professions
    }

    pub fn has_profession(&self, profession: &str) -> bool {
        self.professions
            .binary_search_by(|p| p.as_str().cmp(profession))
            .is_ok()
    }

    /// Observed `[min(age), max(age)]`, or `None` for an empty table.
    pub fn age_bounds(&self) -> Option<AgeRange> {
        self.age_bounds
    }

    pub fn len(&self) -> usize {
        self.customers.height()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.height() == 0
    }

    /// Initial filter selection: the first profession and the configured
    /// default range clamped into the observed ages.
    pub fn default_params(&self, default_age_range: [u32; 2]) -> Option<FilterParams> {
        let profession = self.professions.first()?;
        let bounds = self.age_bounds?;
        let range = AgeRange {
            min: default_age_range[0],
            max: default_age_range[1],
        }
        .clamp_into(bounds);
        Some(FilterParams::new(profession.as_str(), range))
    }
}

fn require_columns(df: &DataFrame, table: &str, columns: &[&str]) -> Result<(), LoaderError> {
    let present = df.get_column_names();
    for column in columns {
        if !present.iter().any(|name| name.as_str() == *column) {
            return Err(LoaderError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
        if df.column(column)?.null_count() > 0 {
            return Err(LoaderError::NullValue {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}
