use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub data: DataSettings,
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
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    /// Fixed RNG seed; unset draws from OS entropy per request
    pub seed: Option<u64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            seed: None,
        }
    }
}

fn default_limit() -> u16 { 10 }
fn default_max_limit() -> u16 { 50 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_subject_weight")]
    pub subject: f64,
    #[serde(default = "default_top_rating_weight")]
    pub top_rating: f64,
    #[serde(default = "default_good_rating_weight")]
    pub good_rating: f64,
    #[serde(default = "default_teaching_style_weight")]
    pub teaching_style: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_diversity_weight")]
    pub diversity: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            subject: default_subject_weight(),
            top_rating: default_top_rating_weight(),
            good_rating: default_good_rating_weight(),
            teaching_style: default_teaching_style_weight(),
            availability: default_availability_weight(),
            diversity: default_diversity_weight(),
        }
    }
}

fn default_subject_weight() -> f64 { 40.0 }
fn default_top_rating_weight() -> f64 { 25.0 }
fn default_good_rating_weight() -> f64 { 20.0 }
fn default_teaching_style_weight() -> f64 { 20.0 }
fn default_availability_weight() -> f64 { 15.0 }
fn default_diversity_weight() -> f64 { 10.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_top_threshold")]
    pub top: f64,
    #[serde(default = "default_good_threshold")]
    pub good: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            top: default_top_threshold(),
            good: default_good_threshold(),
        }
    }
}

fn default_top_threshold() -> f64 { 4.5 }
fn default_good_threshold() -> f64 { 4.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_dir")]
    pub dir: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { dir: default_session_dir() }
    }
}

fn default_session_dir() -> PathBuf { PathBuf::from(".tutor-match") }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSettings {
    /// JSON seed catalog; the built-in sample is used when unset
    pub seed_path: Option<PathBuf>,
}

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

impl ScoringSettings {
    /// Validated scoring weights
    pub fn to_weights(&self) -> Result<ScoringWeights, ConfigError> {
        let w = &self.weights;
        let components = [
            ("subject", w.subject),
            ("top_rating", w.top_rating),
            ("good_rating", w.good_rating),
            ("teaching_style", w.teaching_style),
            ("availability", w.availability),
            ("diversity", w.diversity),
        ];
        for (name, value) in components {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.thresholds.good > self.thresholds.top {
            return Err(ConfigError::Message(format!(
                "scoring.thresholds.good ({}) must not exceed scoring.thresholds.top ({})",
                self.thresholds.good, self.thresholds.top
            )));
        }

        Ok(ScoringWeights {
            subject: w.subject,
            top_rating: w.top_rating,
            good_rating: w.good_rating,
            teaching_style: w.teaching_style,
            availability: w.availability,
            diversity: w.diversity,
            top_rating_threshold: self.thresholds.top,
            good_rating_threshold: self.thresholds.good,
        })
    }
}

fn environment() -> Environment {
    // e.g., TUTOR_MATCH__SERVER__PORT -> server.port
    Environment::with_prefix("TUTOR_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TUTOR_MATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
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
