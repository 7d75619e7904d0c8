//! CSV Data Loader Module
//! Reads the customer and coordinate tables with Polars and normalizes them
//! to the canonical column schema.

use crate::config::ColumnMapping;
use crate::data::dataset::{
    Dataset, AGE, GENDER, GENERATION, LATITUDE, LONGITUDE, PROFESSION, PROVINCE,
};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing column '{column}' in {table} table")]
    MissingColumn { table: String, column: String },
    #[error("Column '{column}' in {table} table contains null values")]
    NullValue { table: String, column: String },
    #[error("Province '{0}' appears more than once in the coordinate table")]
    DuplicateProvince(String),
    #[error("Age {0} is outside the supported range")]
    InvalidAge(i64),
}

/// Loads the two input tables from CSV files.
pub struct DataLoader {
    columns: ColumnMapping,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(ColumnMapping::default())
    }
}

impl DataLoader {
    pub fn new(columns: ColumnMapping) -> Self {
        Self { columns }
    }

    /// Load both tables and wrap them in a [`Dataset`].
    pub fn load(&self, customers_path: &Path, coordinates_path: &Path) -> Result<Dataset, LoaderError> {
        let customers = self.load_customers(customers_path)?;
        let coordinates = self.load_coordinates(coordinates_path)?;
        log::info!(
            "loaded {} customers from {}, {} provinces from {}",
            customers.height(),
            customers_path.display(),
            coordinates.height(),
            coordinates_path.display()
        );
        Dataset::new(customers, coordinates)
    }

    /// Load the customer table.
    ///
    /// Rows with a null in any required field, or an age that is negative or
    /// not a whole number, are dropped.
    pub fn load_customers(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        let raw = Self::read_csv(path)?;
        let m = &self.columns;
        require_source_columns(
            &raw,
            "customers",
            &[
                m.profession.as_str(),
                m.province.as_str(),
                m.gender.as_str(),
                m.age.as_str(),
                m.generation.as_str(),
            ],
        )?;

        let total = raw.height();
        let df = raw
            .lazy()
            .select([
                col(m.profession.as_str()).cast(DataType::String).alias(PROFESSION),
                col(m.province.as_str()).cast(DataType::String).alias(PROVINCE),
                col(m.gender.as_str()).cast(DataType::String).alias(GENDER),
                col(m.age.as_str()).cast(DataType::Float64).alias(AGE),
                col(m.generation.as_str()).cast(DataType::String).alias(GENERATION),
            ])
            .filter(
                col(PROFESSION)
                    .is_not_null()
                    .and(col(PROVINCE).is_not_null())
                    .and(col(GENDER).is_not_null())
                    .and(col(GENERATION).is_not_null())
                    .and(col(AGE).gt_eq(lit(0.0)))
                    .and((col(AGE) % lit(1.0)).eq(lit(0.0))),
            )
            .with_column(col(AGE).cast(DataType::Int64))
            .collect()?;

        let dropped = total - df.height();
        if dropped > 0 {
            log::warn!("dropped {} incomplete customer rows of {}", dropped, total);
        }
        Ok(df)
    }

    /// Load the province coordinate table.
    pub fn load_coordinates(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        let raw = Self::read_csv(path)?;
        require_source_columns(&raw, "coordinates", &[PROVINCE, LATITUDE, LONGITUDE])?;

        let total = raw.height();
        let df = raw
            .lazy()
            .select([
                col(PROVINCE).cast(DataType::String),
                col(LATITUDE).cast(DataType::Float64),
                col(LONGITUDE).cast(DataType::Float64),
            ])
            .filter(
                col(PROVINCE)
                    .is_not_null()
                    .and(col(LATITUDE).is_not_null())
                    .and(col(LONGITUDE).is_not_null()),
            )
            .collect()?;

        let dropped = total - df.height();
        if dropped > 0 {
            log::warn!("dropped {} incomplete coordinate rows of {}", dropped, total);
        }
        Ok(df)
    }

    fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }
}

fn require_source_columns(
    df: &DataFrame,
    table: &str,
    columns: &[&str],
) -> Result<(), LoaderError> {
    let present = df.get_column_names();
    match columns
        .iter()
        .find(|column| !present.iter().any(|name| name.as_str() == **column))
    {
        Some(missing) => Err(LoaderError::MissingColumn {
            table: table.to_string(),
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_and_renames_source_columns() {
        let customers = csv(
            "Profession,province,gender,age,generation\n\
             Engineer,Jakarta,Male,30,Millennial\n\
             Teacher,Bali,Female,25,Gen Z\n",
        );
        let coordinates = csv("province,latitude,longitude\nJakarta,-6.2,106.8\n");

        let dataset = DataLoader::default()
            .load(customers.path(), coordinates.path())
            .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.professions(), ["Engineer", "Teacher"]);
        assert_eq!(dataset.coordinates().height(), 1);
    }

    #[test]
    fn drops_incomplete_customer_rows() {
        let customers = csv(
            "Profession,province,gender,age,generation\n\
             Engineer,Jakarta,Male,30,Millennial\n\
             Engineer,,Male,31,Millennial\n\
             Teacher,Bali,Female,,Gen Z\n",
        );
        let df = DataLoader::default().load_customers(customers.path()).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn drops_fractional_ages() {
        let customers = csv(
            "Profession,province,gender,age,generation\n\
             Engineer,Jakarta,Male,30,Millennial\n\
             Engineer,Jakarta,Male,30.7,Millennial\n\
             Teacher,Bali,Female,-2,Gen Z\n",
        );
        let df = DataLoader::default().load_customers(customers.path()).unwrap();
        assert_eq!(df.height(), 1);
        let ages = df.column(AGE).unwrap().i64().unwrap();
        assert_eq!(ages.get(0), Some(30));
    }

    #[test]
    fn reports_missing_source_column() {
        let customers = csv("Profession,province,gender,generation\nEngineer,Jakarta,Male,Gen Z\n");
        let result = DataLoader::default().load_customers(customers.path());
        assert!(matches!(
            result,
            Err(LoaderError::MissingColumn { ref column, .. }) if column == "age"
        ));
    }

    #[test]
    fn honours_custom_column_mapping() {
        let customers = csv(
            "job,region,sex,years,cohort\n\
             Nurse,Aceh,Female,41,Gen X\n",
        );
        let mapping = ColumnMapping {
            profession: "job".to_string(),
            province: "region".to_string(),
            gender: "sex".to_string(),
            age: "years".to_string(),
            generation: "cohort".to_string(),
        };
        let df = DataLoader::new(mapping).load_customers(customers.path()).unwrap();
        assert_eq!(df.height(), 1);
        assert!(df.column(PROFESSION).is_ok());
        assert!(df.column(GENERATION).is_ok());
    }
}
