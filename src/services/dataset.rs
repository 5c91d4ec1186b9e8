use crate::models::{ClinicalRecord, Place, Table};
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a dataset file
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("invalid value {value:?} in column {column} at line {line}")]
    InvalidValue {
        column: String,
        value: String,
        line: u64,
    },

    #[error("dataset has no rows")]
    Empty,
}

/// Column names of a clinical reference dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalColumns {
    pub score: String,
    pub gender: String,
    pub age: String,
    /// Upper bound for reference scores; rows above it fail the load
    pub max_score: Option<u32>,
}

impl ClinicalColumns {
    pub fn new(score: impl Into<String>) -> Self {
        Self {
            score: score.into(),
            gender: "Gender".to_string(),
            age: "Age".to_string(),
            max_score: None,
        }
    }

    pub fn with_max_score(mut self, max_score: u32) -> Self {
        self.max_score = Some(max_score);
        self
    }
}

const PLACE_NAME: &str = "Place_Name";
const CATEGORY: &str = "Category";
const CITY: &str = "City";
const PRICE: &str = "Price";
const TIME_MINUTES: &str = "Time_Minutes";
const RATING: &str = "Rating";

/// Load a clinical dataset from a CSV file
pub fn load_clinical<P: AsRef<Path>>(
    path: P,
    columns: &ClinicalColumns,
) -> Result<Table<ClinicalRecord>, DatasetError> {
    let table = read_clinical(open(path.as_ref())?, columns)?;
    tracing::info!("Loaded {} clinical rows from {}", table.len(), path.as_ref().display());
    Ok(table)
}

/// Load the tourism dataset from a CSV file
pub fn load_places<P: AsRef<Path>>(path: P) -> Result<Table<Place>, DatasetError> {
    let table = read_places(open(path.as_ref())?)?;
    tracing::info!("Loaded {} places from {}", table.len(), path.as_ref().display());
    Ok(table)
}

/// Parse a clinical dataset from any reader
///
/// Blank reference scores load as 0. Scores above `columns.max_score` are
/// rejected. Columns other than score, gender and age are kept verbatim in
/// `attributes`.
pub fn read_clinical<R: Read>(
    reader: R,
    columns: &ClinicalColumns,
) -> Result<Table<ClinicalRecord>, DatasetError> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let score_idx = column_index(&headers, &columns.score)?;
    let gender_idx = column_index(&headers, &columns.gender)?;
    let age_idx = column_index(&headers, &columns.age)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);

        let reference_score = parse_or_zero::<u32>(&record, score_idx, &columns.score, line)?;
        if columns.max_score.is_some_and(|max| reference_score > max) {
            return Err(DatasetError::InvalidValue {
                column: columns.score.clone(),
                value: field(&record, score_idx).to_string(),
                line,
            });
        }

        let attributes: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(i, _)| *i != score_idx && *i != gender_idx && *i != age_idx)
            .map(|(_, (header, value))| (header.to_string(), value.to_string()))
            .collect();

        rows.push(ClinicalRecord {
            reference_score,
            gender: field(&record, gender_idx).to_string(),
            age: field(&record, age_idx).to_string(),
            attributes,
        });
    }

    non_empty(rows)
}

/// Parse the tourism dataset from any reader
///
/// Blank `Price`, `Time_Minutes` and `Rating` load as 0.
pub fn read_places<R: Read>(reader: R) -> Result<Table<Place>, DatasetError> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let name_idx = column_index(&headers, PLACE_NAME)?;
    let category_idx = column_index(&headers, CATEGORY)?;
    let city_idx = column_index(&headers, CITY)?;
    let price_idx = column_index(&headers, PRICE)?;
    let time_idx = column_index(&headers, TIME_MINUTES)?;
    let rating_idx = column_index(&headers, RATING)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);

        rows.push(Place {
            place_name: field(&record, name_idx).to_string(),
            category: field(&record, category_idx).to_string(),
            city: field(&record, city_idx).to_string(),
            price: parse_finite(&record, price_idx, PRICE, line)?,
            time_minutes: parse_finite(&record, time_idx, TIME_MINUTES, line)?,
            rating: parse_finite(&record, rating_idx, RATING, line)?,
        });
    }

    non_empty(rows)
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_or_zero<T>(
    record: &StringRecord,
    idx: usize,
    column: &str,
    line: u64,
) -> Result<T, DatasetError>
where
    T: std::str::FromStr + Default,
{
    let raw = field(record, idx);
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse::<T>().map_err(|_| DatasetError::InvalidValue {
        column: column.to_string(),
        value: raw.to_string(),
        line,
    })
}

fn parse_finite(record: &StringRecord, idx: usize, column: &str, line: u64) -> Result<f64, DatasetError> {
    let value = parse_or_zero::<f64>(record, idx, column, line)?;
    if !value.is_finite() {
        return Err(DatasetError::InvalidValue {
            column: column.to_string(),
            value: field(record, idx).to_string(),
            line,
        });
    }
    Ok(value)
}

fn non_empty<R>(rows: Vec<R>) -> Result<Table<R>, DatasetError> {
    if rows.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(Table::new(rows))
}
