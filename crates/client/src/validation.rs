//! Configuration validation

use crate::{ClientConfig, ClientError, Result};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire client configuration, reporting every problem at once
pub fn validate_config(config: &ClientConfig) -> Result<()> {
    let mut errors = Vec::new();

    let network = &config.network;
    if network.chain_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "network.chain_id",
            "chain id is required",
        ));
    }

    if network.contract_address.trim().is_empty() {
        errors.push(ValidationError::new(
            "network.contract_address",
            "contract address is required",
        ));
    } else if !network.contract_address.starts_with(&network.address_prefix) {
        errors.push(ValidationError::new(
            "network.contract_address",
            format!("must use the '{}' prefix", network.address_prefix),
        ));
    }

    if network.address_prefix.is_empty()
        || !network
            .address_prefix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        errors.push(ValidationError::new(
            "network.address_prefix",
            "must be non-empty lowercase alphanumeric",
        ));
    }

    if network.fee_denom.trim().is_empty() {
        errors.push(ValidationError::new(
            "network.fee_denom",
            "fee denom is required",
        ));
    }

    if let Err(e) = validate_log_level(&network.log_level) {
        errors.push(e);
    }

    if let Some(key) = &config.signer.private_key {
        if let Err(e) = validate_private_key(key) {
            errors.push(e);
        }
    }

    if config.orders.expiry_secs == 0 {
        errors.push(ValidationError::new(
            "orders.expiry_secs",
            "must be greater than 0",
        ));
    }

    if let Some(router) = &config.orders.router {
        if !router.starts_with(&network.address_prefix) {
            errors.push(ValidationError::new(
                "orders.router",
                format!("must use the '{}' prefix", network.address_prefix),
            ));
        }
    }

    if !errors.is_empty() {
        let error_msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ClientError::ValidationError(error_msg));
    }

    Ok(())
}

fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "network.log_level",
            format!("must be one of {}", LOG_LEVELS.join(", ")),
        ))
    }
}

fn validate_private_key(key: &str) -> std::result::Result<(), ValidationError> {
    let key = key.trim_start_matches("0x");
    match hex::decode(key) {
        Ok(bytes) if bytes.len() == 32 => Ok(()),
        Ok(bytes) => Err(ValidationError::new(
            "signer.private_key",
            format!("expected 32 bytes, got {}", bytes.len()),
        )),
        Err(_) => Err(ValidationError::new(
            "signer.private_key",
            "must be hex encoded",
        )),
    }
}
