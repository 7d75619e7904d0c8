//! Memoised aggregation over one immutable dataset.

use crate::aggregate::{
    AgeRange, AggregateError, Aggregator, DashboardTables, FilterParams, GenerationCounts,
    ProfessionCounts, ProfessionGenderCounts, ProvinceGenderTotals,
};
use crate::data::Dataset;
use std::collections::HashMap;

/// Owns the session's dataset and caches the filtered tables by parameter.
///
/// The unfiltered tables are computed once up front. Entries are never
/// evicted: there is at most one per observed profession and one per ordered
/// pair of observed ages when filled through `snapshot`, which rejects
/// anything else.
pub struct AggregateCache {
    dataset: Dataset,
    profession_counts: ProfessionCounts,
    province_geography: ProvinceGenderTotals,
    generations: HashMap<String, GenerationCounts>,
    genders: HashMap<AgeRange, ProfessionGenderCounts>,
}

impl AggregateCache {
    pub fn new(dataset: Dataset) -> Result<Self, AggregateError> {
        let profession_counts = Aggregator::profession_counts(dataset.customers())?;
        let province_geography =
            Aggregator::province_geography(dataset.customers(), dataset.coordinates())?;
        Ok(Self {
            dataset,
            profession_counts,
            province_geography,
            generations: HashMap::new(),
            genders: HashMap::new(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn profession_counts(&self) -> &ProfessionCounts {
        &self.profession_counts
    }

    pub fn province_geography(&self) -> &ProvinceGenderTotals {
        &self.province_geography
    }

    pub fn generation_counts(&mut self, profession: &str) -> Result<&GenerationCounts, AggregateError> {
        if !self.generations.contains_key(profession) {
            let table = Aggregator::generation_counts(self.dataset.customers(), profession)?;
            self.generations.insert(profession.to_string(), table);
        }
        Ok(&self.generations[profession])
    }

    pub fn profession_gender_counts(
        &mut self,
        range: AgeRange,
    ) -> Result<&ProfessionGenderCounts, AggregateError> {
        if !self.genders.contains_key(&range) {
            let table =
                Aggregator::profession_gender_counts(self.dataset.customers(), range.min, range.max)?;
            self.genders.insert(range, table);
        }
        Ok(&self.genders[&range])
    }

    /// Validate `params` and assemble all four tables, computing only what
    /// is not cached yet.
    pub fn snapshot(&mut self, params: &FilterParams) -> Result<DashboardTables, AggregateError> {
        params.validate(&self.dataset)?;
        let generation_counts = self.generation_counts(&params.profession)?.clone();
        let profession_gender_counts = self.profession_gender_counts(params.age_range)?.clone();
        Ok(DashboardTables {
            profession_counts: self.profession_counts.clone(),
            province_geography: self.province_geography.clone(),
            generation_counts,
            profession_gender_counts,
        })
    }

    /// Number of cached filtered tables.
    pub fn cached_entries(&self) -> usize {
        self.generations.len() + self.genders.len()
    }
}
