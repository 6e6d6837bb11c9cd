//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SCORER_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_RUBRIC_PATH, DEFAULT_SCORE_TIMEOUT_MS};
use crate::embedding::EmbedderConfig;
use crate::similarity::SimilarityStrategy;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SCORER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Rubric served for the `"default"` id. Default: `rubric_config.json`.
    pub rubric_path: PathBuf,

    /// Directory searched for `<rubric_id>.json` when another id is requested.
    pub rubric_dir: Option<PathBuf>,

    /// Semantic similarity strategy. Default: lexical.
    pub similarity: SimilarityStrategy,

    /// BERT model directory used by the embedding strategy.
    pub model_path: Option<PathBuf>,

    /// Upper bound on the time spent scoring one request. Default: 10s.
    pub score_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            rubric_path: PathBuf::from(DEFAULT_RUBRIC_PATH),
            rubric_dir: None,
            similarity: SimilarityStrategy::default(),
            model_path: None,
            score_timeout: Duration::from_millis(DEFAULT_SCORE_TIMEOUT_MS),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SCORER_PORT";
    const ENV_BIND_ADDR: &'static str = "SCORER_BIND_ADDR";
    const ENV_RUBRIC_PATH: &'static str = "SCORER_RUBRIC_PATH";
    const ENV_RUBRIC_DIR: &'static str = "SCORER_RUBRIC_DIR";
    const ENV_SIMILARITY: &'static str = "SCORER_SIMILARITY";
    const ENV_MODEL_PATH: &'static str = "SCORER_MODEL_PATH";
    const ENV_SCORE_TIMEOUT_MS: &'static str = "SCORER_SCORE_TIMEOUT_MS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let rubric_path = Self::parse_path_from_env(Self::ENV_RUBRIC_PATH, defaults.rubric_path);
        let rubric_dir = Self::parse_optional_path_from_env(Self::ENV_RUBRIC_DIR);
        let similarity = Self::parse_similarity_from_env(defaults.similarity)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let score_timeout = Self::parse_timeout_from_env(defaults.score_timeout)?;

        Ok(Self {
            port,
            bind_addr,
            rubric_path,
            rubric_dir,
            similarity,
            model_path,
            score_timeout,
        })
    }

    /// Validates configured directories.
    ///
    /// The default rubric file is not checked here: a missing rubric surfaces as a
    /// server error on the first request that needs it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.rubric_dir, &self.model_path].into_iter().flatten() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Embedder settings derived from this config.
    pub fn embedder_config(&self) -> EmbedderConfig {
        match &self.model_path {
            Some(path) => EmbedderConfig::new(path.clone()),
            None => EmbedderConfig::stub(),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_similarity_from_env(
        default: SimilarityStrategy,
    ) -> Result<SimilarityStrategy, ConfigError> {
        match env::var(Self::ENV_SIMILARITY) {
            Ok(value) => Ok(value.parse()?),
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_SCORE_TIMEOUT_MS) {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
                _ => Err(ConfigError::InvalidTimeout { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}
