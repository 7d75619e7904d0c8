//! Aggregate module - cross-tabulations behind the dashboard charts

mod cache;
mod calculator;
mod category;
mod params;
mod tables;

pub use cache::AggregateCache;
pub use calculator::{AggregateError, Aggregator};
pub use category::{Gender, GenderCrossTab, ZeroFill};
pub use params::{AgeRange, FilterParams};
pub use tables::{
    DashboardTables, GenerationCount, GenerationCounts, ProfessionCount, ProfessionCounts,
    ProfessionGenderCount, ProfessionGenderCounts, ProvinceGenderTotal, ProvinceGenderTotals,
};
