//! Off-chain tooling for the limit order contract
//!
//! This crate provides what makers and takers need outside the chain:
//! - Client configuration from TOML, YAML, JSON or the environment
//! - Config validation
//! - Structured logging setup
//! - Order signing against a deployment's domain
//! - Execute message builders

mod settings;
mod loader;
mod logging;
mod messages;
mod signer;
mod validation;

pub use settings::*;
pub use loader::*;
pub use logging::*;
pub use messages::*;
pub use signer::*;
pub use validation::*;

use limit_orders_types::VerificationError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Address encoding failed: {0}")]
    AddressError(String),

    #[error("Order maker {maker} is not the signer {signer}")]
    MakerMismatch { maker: String, signer: String },

    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] limit_orders_types::OrderError),

    #[error("Signing error: {0}")]
    SigningError(#[from] VerificationError),

    #[error("Logging init error: {0}")]
    LoggingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config library error: {0}")]
    ConfigLibError(#[from] ::config::ConfigError),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(#[from] cosmwasm_std::StdError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
