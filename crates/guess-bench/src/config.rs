use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    pub run_id: String,
    /// Path to the catalog JSON the engine plays against.
    pub catalog: PathBuf,
    pub games: SimGames,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub answerer: AnswererConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        self.answerer.validate()?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve `{run_id}` templates in output paths into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// How many games to play and with which base seed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimGames {
    pub count: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimGames {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Simulated player behavior.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnswererConfig {
    /// Chance of answering "I don't know" instead of the honest answer.
    #[serde(default)]
    pub dont_know_rate: f64,
}

impl Default for AnswererConfig {
    fn default() -> Self {
        Self { dont_know_rate: 0.0 }
    }
}

impl AnswererConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.dont_know_rate) {
            return Err(ValidationError::InvalidField {
                field: "answerer.dont_know_rate".to_string(),
                message: "rate must be between 0 and 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default)]
    pub level: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        self.level
            .as_deref()
            .and_then(|raw| raw.trim().parse::<Level>().ok())
    }

    fn normalize(&mut self) {
        if let Some(level) = &self.level
            && level.trim().is_empty()
        {
            self.level = None;
        }
    }
}

/// Output templates resolved to concrete paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid config at {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("run_id {run_id:?} contains characters outside [A-Za-z0-9._-]")]
    InvalidRunId { run_id: String },
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.is_empty() || !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidRunId {
            run_id: run_id.to_string(),
        });
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &Path) -> PathBuf {
    let raw = template.to_string_lossy().replace("{run_id}", run_id);
    PathBuf::from(raw)
}
