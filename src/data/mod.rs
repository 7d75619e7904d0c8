//! Data module - dataset loading and frame processing

mod dataset;
mod loader;
mod processor;

pub use dataset::{
    coordinates_frame, customers_frame, CustomerRecord, Dataset, ProvinceCoordinate, AGE,
    COORDINATE_COLUMNS, CUSTOMER_COLUMNS, GENDER, GENERATION, LATITUDE, LONGITUDE, PROFESSION,
    PROVINCE,
};
pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, COUNT};
