//! Client configuration structures

use serde::{Deserialize, Serialize};

/// Main client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Chain and deployment the client talks to
    pub network: NetworkConfig,

    /// Key used to sign orders
    #[serde(default)]
    pub signer: SignerConfig,

    /// Defaults applied to new orders
    #[serde(default)]
    pub orders: OrderDefaults,
}

/// Network environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Environment type (mainnet, testnet, local)
    pub environment: Environment,

    /// Chain identifier bound into the signing domain
    pub chain_id: String,

    /// Limit order contract address, also bound into the signing domain
    pub contract_address: String,

    /// Bech32 prefix for account addresses
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,

    /// Native denom the contract charges fees in
    #[serde(default = "default_fee_denom")]
    pub fee_denom: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Mainnet,
    Testnet,
    Local,
}

/// Signing key configuration
///
/// The key is normally supplied through `LIMIT_ORDERS__SIGNER__PRIVATE_KEY`
/// rather than written into a file.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Hex-encoded 32 byte secp256k1 private key
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,
}

impl std::fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Defaults for orders built by this client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDefaults {
    /// Seconds from now until a new order expires
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,

    /// Platform fee the contract currently charges, in `fee_denom`
    #[serde(default)]
    pub platform_fee: u64,

    /// Execution fee the contract currently charges, in `fee_denom`
    #[serde(default)]
    pub execution_fee: u64,

    /// Router named on routed orders; the contract default applies when unset
    #[serde(default)]
    pub router: Option<String>,
}

fn default_address_prefix() -> String {
    "cosmos".to_string()
}

fn default_fee_denom() -> String {
    "uatom".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_expiry_secs() -> u64 {
    3600
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            chain_id: "localnet-1".to_string(),
            contract_address: String::new(),
            address_prefix: default_address_prefix(),
            fee_denom: default_fee_denom(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl Default for OrderDefaults {
    fn default() -> Self {
        Self {
            expiry_secs: default_expiry_secs(),
            platform_fee: 0,
            execution_fee: 0,
            router: None,
        }
    }
}

impl OrderDefaults {
    /// Total attached to every placement
    pub fn total_fee(&self) -> u128 {
        u128::from(self.platform_fee) + u128::from(self.execution_fee)
    }
}
