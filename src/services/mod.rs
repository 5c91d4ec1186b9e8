// Service exports
pub mod dataset;

pub use dataset::{load_clinical, load_places, read_clinical, read_places, ClinicalColumns, DatasetError};
