//! Filter parameters chosen in the control panel.

use crate::aggregate::AggregateError;
use crate::data::Dataset;
use std::fmt;

/// Inclusive age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub fn new(min: u32, max: u32) -> Result<Self, AggregateError> {
        if min > max {
            return Err(AggregateError::InvalidParameter(format!(
                "age range minimum {} is above maximum {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }

    /// True when both bounds fall inside `bounds`.
    pub fn within(&self, bounds: &AgeRange) -> bool {
        bounds.contains(self.min) && bounds.contains(self.max)
    }

    /// Pull both bounds into `bounds`.
    pub fn clamp_into(self, bounds: AgeRange) -> AgeRange {
        let min = self.min.clamp(bounds.min, bounds.max);
        let max = self.max.clamp(min, bounds.max);
        AgeRange { min, max }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}

/// Session-scoped selection: one profession and one age range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterParams {
    pub profession: String,
    pub age_range: AgeRange,
}

impl FilterParams {
    pub fn new(profession: &str, age_range: AgeRange) -> Self {
        Self {
            profession: profession.to_string(),
            age_range,
        }
    }

    /// Check the selection against the categories and ages observed in
    /// `dataset`. Nothing is corrected.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), AggregateError> {
        if !dataset.has_profession(&self.profession) {
            return Err(AggregateError::InvalidParameter(format!(
                "unknown profession \"{}\"",
                self.profession
            )));
        }
        let range = AgeRange::new(self.age_range.min, self.age_range.max)?;
        let Some(bounds) = dataset.age_bounds() else {
            return Err(AggregateError::InvalidParameter(
                "dataset has no ages to select from".to_string(),
            ));
        };
        if !range.within(&bounds) {
            return Err(AggregateError::InvalidParameter(format!(
                "age range {} is outside observed ages {}",
                range, bounds
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CustomerRecord, ProvinceCoordinate};

    fn dataset() -> Dataset {
        Dataset::from_records(
            &[
                CustomerRecord::new("Engineer", "Jakarta", "Male", 22, "Gen Z"),
                CustomerRecord::new("Teacher", "Bali", "Female", 61, "Boomer"),
            ],
            &[ProvinceCoordinate::new("Bali", -8.4, 115.2)],
        )
        .unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(AgeRange::new(30, 30).is_ok());
        assert!(matches!(
            AgeRange::new(31, 30),
            Err(AggregateError::InvalidParameter(_))
        ));
    }

    #[test]
    fn clamp_keeps_range_ordered() {
        let bounds = AgeRange { min: 22, max: 61 };
        assert_eq!(
            AgeRange { min: 20, max: 50 }.clamp_into(bounds),
            AgeRange { min: 22, max: 50 }
        );
        assert_eq!(
            AgeRange { min: 70, max: 80 }.clamp_into(bounds),
            AgeRange { min: 61, max: 61 }
        );
    }

    #[test]
    fn validate_accepts_observed_selection() {
        let params = FilterParams::new("Teacher", AgeRange { min: 22, max: 61 });
        assert!(params.validate(&dataset()).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_profession() {
        let params = FilterParams::new("Pilot", AgeRange { min: 22, max: 61 });
        assert!(matches!(
            params.validate(&dataset()),
            Err(AggregateError::InvalidParameter(msg)) if msg.contains("Pilot")
        ));
    }

    #[test]
    fn validate_rejects_bounds_outside_observed_ages() {
        let params = FilterParams::new("Teacher", AgeRange { min: 20, max: 50 });
        assert!(matches!(
            params.validate(&dataset()),
            Err(AggregateError::InvalidParameter(_))
        ));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let params = FilterParams::new("Teacher", AgeRange { min: 50, max: 30 });
        assert!(matches!(
            params.validate(&dataset()),
            Err(AggregateError::InvalidParameter(_))
        ));
    }
}
