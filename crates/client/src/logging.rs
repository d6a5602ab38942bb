use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{ClientError, NetworkConfig, Result};

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing(level: &str, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(level)))
        .map_err(|e| ClientError::LoggingError(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json {
        registry
            .with(fmt::layer().with_target(true).with_level(true).json())
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_level(true))
            .try_init()
    };

    result.map_err(|e| ClientError::LoggingError(e.to_string()))
}

/// Install tracing as configured for `network`
pub fn init_tracing_for(network: &NetworkConfig) -> Result<()> {
    init_tracing(&network.log_level, network.json_logs)
}

fn filter_directive(level: &str) -> String {
    format!("warn,limit_orders_client={}", level.to_lowercase())
}
