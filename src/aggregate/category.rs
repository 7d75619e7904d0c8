//! Category handling for cross-tabulations: the closed gender set and the
//! zero-fill policy applied when a cross-tab is reshaped.

use crate::aggregate::AggregateError;
use crate::data::{DataProcessor, GENDER};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }

    fn index(self) -> usize {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Female" => Ok(Gender::Female),
            "Male" => Ok(Gender::Male),
            other => Err(AggregateError::DataValidation(format!(
                "unexpected gender value \"{}\"",
                other
            ))),
        }
    }
}

/// What a cross-tab does with category pairs that have no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroFill {
    /// Emit the pair with a count of zero.
    Fill,
    /// Leave the pair out.
    Omit,
}

/// Counts keyed by one string category and gender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenderCrossTab {
    cells: BTreeMap<String, [u64; 2]>,
}

impl GenderCrossTab {
    /// Build from the output of `DataProcessor::count_by(df, &[key, "gender"])`.
    ///
    /// Fails on any gender outside the known set.
    pub fn from_counts(grouped: &DataFrame, key: &str) -> Result<Self, AggregateError> {
        let keys = DataProcessor::str_column(grouped, key)?;
        let genders = DataProcessor::str_column(grouped, GENDER)?;
        let counts = DataProcessor::count_column(grouped)?;

        let mut cells: BTreeMap<String, [u64; 2]> = BTreeMap::new();
        for ((k, g), count) in keys.into_iter().zip(genders).zip(counts) {
            let (Some(k), Some(g)) = (k, g) else {
                return Err(AggregateError::DataValidation(format!(
                    "null {} or gender in cross-tab",
                    key
                )));
            };
            let gender: Gender = g.parse().map_err(|_| {
                AggregateError::DataValidation(format!(
                    "unexpected gender value \"{}\" for {} \"{}\"",
                    g, key, k
                ))
            })?;
            cells.entry(k.to_string()).or_default()[gender.index()] += count;
        }

        Ok(Self { cells })
    }

    /// Long form: one `(key, gender, count)` per cell, keys in lexical order.
    pub fn melt(&self, policy: ZeroFill) -> Vec<(String, Gender, u64)> {
        self.cells
            .iter()
            .flat_map(|(key, counts)| {
                Gender::ALL
                    .iter()
                    .map(move |gender| (key, *gender, counts[gender.index()]))
            })
            .filter(|(_, _, count)| policy == ZeroFill::Fill || *count > 0)
            .map(|(key, gender, count)| (key.clone(), gender, count))
            .collect()
    }

    /// Wide form: one row per key with the gender counts `policy` keeps,
    /// keys in lexical order. Under `ZeroFill::Fill` every row holds both
    /// genders.
    pub fn wide(&self, policy: ZeroFill) -> Vec<(String, BTreeMap<Gender, u64>)> {
        let mut rows: Vec<(String, BTreeMap<Gender, u64>)> = Vec::new();
        for (key, gender, count) in self.melt(policy) {
            match rows.last_mut() {
                Some((last, counts)) if *last == key => {
                    counts.insert(gender, count);
                }
                _ => rows.push((key, BTreeMap::from([(gender, count)]))),
            }
        }
        rows
    }
}
