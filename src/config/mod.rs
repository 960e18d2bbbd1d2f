//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `AGRIFIND_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::embedding::EmbeddingModel;
use crate::ranking::SelectionStrategy;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `AGRIFIND_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Firestore REST endpoint base URL. Default: `https://firestore.googleapis.com`.
    pub firestore_url: String,

    /// Firestore project id. Default: empty (must be set for a real store).
    pub firestore_project: String,

    /// Optional OAuth bearer token for Firestore requests.
    pub firestore_token: Option<String>,

    /// Directory holding the embedding model files (`model.safetensors`,
    /// `config.json`, `tokenizer.json`). `None` runs the embedder in stub mode.
    pub model_path: Option<PathBuf>,

    /// Which sentence encoder the deployment uses.
    pub embedding_model: EmbeddingModel,

    /// Candidate page size for the listing scan. Default: `50`.
    pub page_size: usize,

    /// Whether equal composite scores are broken by ascending price.
    /// Default: `true`.
    pub tie_break_by_price: bool,

    /// Top-K evaluation strategy. Default: [`SelectionStrategy::Streaming`].
    pub strategy: SelectionStrategy,
}

/// Default Firestore endpoint used when `AGRIFIND_FIRESTORE_URL` is not set.
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            firestore_url: DEFAULT_FIRESTORE_URL.to_string(),
            firestore_project: String::new(),
            firestore_token: None,
            model_path: None,
            embedding_model: EmbeddingModel::default(),
            page_size: DEFAULT_PAGE_SIZE,
            tie_break_by_price: true,
            strategy: SelectionStrategy::Streaming,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "AGRIFIND_PORT";
    const ENV_BIND_ADDR: &'static str = "AGRIFIND_BIND_ADDR";
    const ENV_FIRESTORE_URL: &'static str = "AGRIFIND_FIRESTORE_URL";
    const ENV_FIRESTORE_PROJECT: &'static str = "AGRIFIND_FIRESTORE_PROJECT";
    const ENV_FIRESTORE_TOKEN: &'static str = "AGRIFIND_FIRESTORE_TOKEN";
    const ENV_MODEL_PATH: &'static str = "AGRIFIND_MODEL_PATH";
    const ENV_EMBEDDING_MODEL: &'static str = "AGRIFIND_EMBEDDING_MODEL";
    const ENV_PAGE_SIZE: &'static str = "AGRIFIND_PAGE_SIZE";
    const ENV_TIE_BREAK_BY_PRICE: &'static str = "AGRIFIND_TIE_BREAK_BY_PRICE";
    const ENV_STRATEGY: &'static str = "AGRIFIND_STRATEGY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let firestore_url =
            Self::parse_string_from_env(Self::ENV_FIRESTORE_URL, defaults.firestore_url);
        let firestore_project =
            Self::parse_string_from_env(Self::ENV_FIRESTORE_PROJECT, defaults.firestore_project);
        let firestore_token = Self::parse_optional_string_from_env(Self::ENV_FIRESTORE_TOKEN);
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let embedding_model = Self::parse_embedding_model_from_env(defaults.embedding_model)?;
        let page_size = Self::parse_page_size_from_env(defaults.page_size)?;
        let tie_break_by_price =
            Self::parse_bool_from_env(Self::ENV_TIE_BREAK_BY_PRICE, defaults.tie_break_by_price);
        let strategy = Self::parse_strategy_from_env(defaults.strategy)?;

        Ok(Self {
            port,
            bind_addr,
            firestore_url,
            firestore_project,
            firestore_token,
            model_path,
            embedding_model,
            page_size,
            tie_break_by_price,
            strategy,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize {
                value: self.page_size.to_string(),
            });
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

    fn parse_page_size_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_PAGE_SIZE) {
            Ok(value) => {
                let size: usize = value
                    .parse()
                    .map_err(|_| ConfigError::InvalidPageSize {
                        value: value.clone(),
                    })?;
                if size == 0 {
                    return Err(ConfigError::InvalidPageSize { value });
                }
                Ok(size)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_embedding_model_from_env(
        default: EmbeddingModel,
    ) -> Result<EmbeddingModel, ConfigError> {
        match env::var(Self::ENV_EMBEDDING_MODEL) {
            Ok(value) => {
                EmbeddingModel::parse(&value).ok_or(ConfigError::UnknownEmbeddingModel { value })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_strategy_from_env(default: SelectionStrategy) -> Result<SelectionStrategy, ConfigError> {
        match env::var(Self::ENV_STRATEGY) {
            Ok(value) => match value.to_ascii_lowercase().as_str() {
                "streaming" => Ok(SelectionStrategy::Streaming),
                "full-sort" | "full_sort" => Ok(SelectionStrategy::FullSort),
                _ => Err(ConfigError::UnknownStrategy { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
