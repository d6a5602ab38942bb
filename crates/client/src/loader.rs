//! Configuration loading from multiple sources

use crate::{ClientConfig, ClientError, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;
use tracing::{debug, info};

/// Prefix for environment overrides, e.g. `LIMIT_ORDERS__NETWORK__CHAIN_ID`
pub const ENV_PREFIX: &str = "LIMIT_ORDERS";

const ENV_SEPARATOR: &str = "__";

/// Configuration loader with support for multiple formats and sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    ///
    /// Supports TOML, YAML, and JSON formats based on file extension
    pub fn from_file(path: &Path) -> Result<ClientConfig> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ClientError::LoadError("No file extension found".to_string()))?;

        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading client config");

        match extension {
            "toml" => Self::from_toml(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            _ => Err(ClientError::LoadError(format!(
                "Unsupported file extension: {extension}"
            ))),
        }
    }

    pub fn from_toml(content: &str) -> Result<ClientConfig> {
        toml::from_str(content).map_err(ClientError::from)
    }

    pub fn from_yaml(content: &str) -> Result<ClientConfig> {
        serde_yaml::from_str(content).map_err(ClientError::from)
    }

    pub fn from_json(content: &str) -> Result<ClientConfig> {
        serde_json::from_str(content).map_err(ClientError::from)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<ClientConfig> {
        Self::builder().add_env(ENV_PREFIX).build()
    }

    /// Load a file, then let environment variables with `env_prefix` override
    /// individual keys
    pub fn from_file_with_env(path: &Path, env_prefix: &str) -> Result<ClientConfig> {
        let config = Self::builder()
            .add_file(path, true)
            .add_env(env_prefix)
            .build()?;
        info!(
            path = %path.display(),
            chain_id = %config.network.chain_id,
            "client config loaded"
        );
        Ok(config)
    }

    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder {
            builder: Config::builder(),
        }
    }
}

/// Builder for layered configuration; later sources win
pub struct ConfigLoaderBuilder {
    builder: ConfigBuilder<config::builder::DefaultState>,
}

impl ConfigLoaderBuilder {
    /// Add a configuration file source
    pub fn add_file(mut self, path: &Path, required: bool) -> Self {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        };

        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(required));
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env(mut self, prefix: &str) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix(prefix)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );
        self
    }

    /// Set a default value for a key
    pub fn set_default(mut self, key: &str, value: &str) -> Result<Self> {
        self.builder = self.builder.set_default(key, value)?;
        Ok(self)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<ClientConfig> {
        let config = self.builder.build()?;
        config.try_deserialize().map_err(ClientError::from)
    }
}
