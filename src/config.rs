use crate::core::{Instrument, DEFAULT_LIMIT, DEFAULT_PENALTY};
use crate::models::{AnswerPolicy, MatchMode};
use crate::services::ClinicalColumns;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub datasets: DatasetSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_depression")]
    pub depression: ClinicalDatasetSettings,
    #[serde(default = "default_anxiety")]
    pub anxiety: ClinicalDatasetSettings,
    #[serde(default = "default_stress")]
    pub stress: ClinicalDatasetSettings,
    #[serde(default = "default_tourism_path")]
    pub tourism: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            depression: default_depression(),
            anxiety: default_anxiety(),
            stress: default_stress(),
            tourism: default_tourism_path(),
        }
    }
}

impl DatasetSettings {
    pub fn for_instrument(&self, instrument: Instrument) -> &ClinicalDatasetSettings {
        match instrument {
            Instrument::Depression => &self.depression,
            Instrument::Anxiety => &self.anxiety,
            Instrument::Stress => &self.stress,
        }
    }
}

/// Location and column layout of one clinical dataset
#[derive(Debug, Clone, Deserialize)]
pub struct ClinicalDatasetSettings {
    pub path: PathBuf,
    pub score_column: String,
    #[serde(default = "default_gender_column")]
    pub gender_column: String,
    #[serde(default = "default_age_column")]
    pub age_column: String,
}

impl ClinicalDatasetSettings {
    fn for_instrument(instrument: Instrument, file: &str) -> Self {
        Self {
            path: PathBuf::from("data").join(file),
            score_column: instrument.score_column().to_string(),
            gender_column: default_gender_column(),
            age_column: default_age_column(),
        }
    }

    pub fn columns(&self) -> ClinicalColumns {
        ClinicalColumns {
            score: self.score_column.clone(),
            gender: self.gender_column.clone(),
            age: self.age_column.clone(),
            max_score: None,
        }
    }
}

fn default_depression() -> ClinicalDatasetSettings {
    ClinicalDatasetSettings::for_instrument(Instrument::Depression, "depression.csv")
}
fn default_anxiety() -> ClinicalDatasetSettings {
    ClinicalDatasetSettings::for_instrument(Instrument::Anxiety, "anxiety.csv")
}
fn default_stress() -> ClinicalDatasetSettings {
    ClinicalDatasetSettings::for_instrument(Instrument::Stress, "stress.csv")
}
fn default_tourism_path() -> PathBuf { PathBuf::from("data/tourism.csv") }
fn default_gender_column() -> String { "Gender".to_string() }
fn default_age_column() -> String { "Age".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_penalty")]
    pub penalty: u32,
    #[serde(default)]
    pub modes: PerInstrument<MatchMode>,
    #[serde(default)]
    pub answer_policies: PerInstrument<AnswerPolicy>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            penalty: default_penalty(),
            modes: PerInstrument::default(),
            answer_policies: PerInstrument::default(),
        }
    }
}

fn default_penalty() -> u32 { DEFAULT_PENALTY }

/// One setting value per instrument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PerInstrument<T> {
    #[serde(default)]
    pub depression: T,
    #[serde(default)]
    pub anxiety: T,
    #[serde(default)]
    pub stress: T,
}

impl<T> PerInstrument<T> {
    pub fn by_ref(&self, instrument: Instrument) -> &T {
        match instrument {
            Instrument::Depression => &self.depression,
            Instrument::Anxiety => &self.anxiety,
            Instrument::Stress => &self.stress,
        }
    }
}

impl<T: Copy> PerInstrument<T> {
    pub fn get(&self, instrument: Instrument) -> T {
        *self.by_ref(instrument)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self { limit: default_limit() }
    }
}

fn default_limit() -> usize { DEFAULT_LIMIT }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PAKAR_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PAKAR__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PAKAR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
