//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CLARITY_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::MAX_DOCUMENT_BYTES;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 7860;
/// Default number of questions remediated concurrently.
pub const DEFAULT_QUESTION_CONCURRENCY: usize = 4;
/// Default model used for question extraction.
pub const DEFAULT_EXTRACT_MODEL: &str = "llama-3.1-8b-instant";
/// Default model used for clarity scoring.
pub const DEFAULT_SCORE_MODEL: &str = "llama-3.3-70b-versatile";
/// Default model used for rephrasing.
pub const DEFAULT_REPHRASE_MODEL: &str = "llama-3.1-8b-instant";

/// Named model configurations for the three generative roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRoles {
    /// Fast model that turns document text into a question list.
    pub extract: String,
    /// Stronger model that rates question clarity.
    pub score: String,
    /// Fast model that proposes rephrasings.
    pub rephrase: String,
}

impl Default for ModelRoles {
    fn default() -> Self {
        Self {
            extract: DEFAULT_EXTRACT_MODEL.to_string(),
            score: DEFAULT_SCORE_MODEL.to_string(),
            rephrase: DEFAULT_REPHRASE_MODEL.to_string(),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CLARITY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `7860`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Generative model identifiers.
    pub models: ModelRoles,

    /// Directory of the bi-encoder (BERT weights + tokenizer). `None` runs the stub.
    pub bi_encoder_path: Option<PathBuf>,

    /// Directory of the cross-encoder (BERT classifier + tokenizer). `None` runs the stub.
    pub cross_encoder_path: Option<PathBuf>,

    /// Per-call timeout for generative requests. Default: 60s.
    pub llm_timeout: Duration,

    /// Largest accepted document in bytes. Default: 10 MiB.
    pub max_document_bytes: usize,

    /// Questions remediated concurrently per document. Default: `4`.
    pub question_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            models: ModelRoles::default(),
            bi_encoder_path: None,
            cross_encoder_path: None,
            llm_timeout: Duration::from_secs(60),
            max_document_bytes: MAX_DOCUMENT_BYTES,
            question_concurrency: DEFAULT_QUESTION_CONCURRENCY,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "CLARITY_PORT";
    const ENV_BIND_ADDR: &'static str = "CLARITY_BIND_ADDR";
    const ENV_EXTRACT_MODEL: &'static str = "CLARITY_EXTRACT_MODEL";
    const ENV_SCORE_MODEL: &'static str = "CLARITY_SCORE_MODEL";
    const ENV_REPHRASE_MODEL: &'static str = "CLARITY_REPHRASE_MODEL";
    const ENV_BI_ENCODER_PATH: &'static str = "CLARITY_BI_ENCODER_PATH";
    const ENV_CROSS_ENCODER_PATH: &'static str = "CLARITY_CROSS_ENCODER_PATH";
    const ENV_LLM_TIMEOUT_SECS: &'static str = "CLARITY_LLM_TIMEOUT_SECS";
    const ENV_MAX_DOCUMENT_BYTES: &'static str = "CLARITY_MAX_DOCUMENT_BYTES";
    const ENV_QUESTION_CONCURRENCY: &'static str = "CLARITY_QUESTION_CONCURRENCY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let models = ModelRoles {
            extract: Self::parse_string_from_env(Self::ENV_EXTRACT_MODEL, defaults.models.extract),
            score: Self::parse_string_from_env(Self::ENV_SCORE_MODEL, defaults.models.score),
            rephrase: Self::parse_string_from_env(
                Self::ENV_REPHRASE_MODEL,
                defaults.models.rephrase,
            ),
        };
        let bi_encoder_path = Self::parse_optional_path_from_env(Self::ENV_BI_ENCODER_PATH);
        let cross_encoder_path = Self::parse_optional_path_from_env(Self::ENV_CROSS_ENCODER_PATH);
        let llm_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_LLM_TIMEOUT_SECS,
            defaults.llm_timeout.as_secs(),
        )?);
        let max_document_bytes = Self::parse_u64_from_env(
            Self::ENV_MAX_DOCUMENT_BYTES,
            defaults.max_document_bytes as u64,
        )? as usize;
        let question_concurrency = Self::parse_u64_from_env(
            Self::ENV_QUESTION_CONCURRENCY,
            defaults.question_concurrency as u64,
        )? as usize;

        Ok(Self {
            port,
            bind_addr,
            models,
            bi_encoder_path,
            cross_encoder_path,
            llm_timeout,
            max_document_bytes,
            question_concurrency,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.bi_encoder_path, &self.cross_encoder_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.question_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_QUESTION_CONCURRENCY,
                reason: "must be at least 1".to_string(),
            });
        }

        if self.llm_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_LLM_TIMEOUT_SECS,
                reason: "must be at least 1 second".to_string(),
            });
        }

        if self.max_document_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_DOCUMENT_BYTES,
                reason: "must be greater than zero".to_string(),
            });
        }

        for (name, model) in [
            (Self::ENV_EXTRACT_MODEL, &self.models.extract),
            (Self::ENV_SCORE_MODEL, &self.models.score),
            (Self::ENV_REPHRASE_MODEL, &self.models.rephrase),
        ] {
            if model.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: "model identifier cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
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

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::NumberParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
