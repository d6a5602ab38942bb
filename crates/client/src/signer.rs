use bech32::{Bech32, Hrp};
use cosmwasm_std::{Binary, Uint128};
use k256::ecdsa::SigningKey;
use limit_orders_types::{
    canonical_address, sign_digest, DomainSeparator, OrderSide, OrderTerms, SignedOrder,
};
use tracing::{debug, info};

use crate::{ClientConfig, ClientError, NetworkConfig, Result};

/// Signing domain of the deployment `network` points at
pub fn domain_for(network: &NetworkConfig) -> DomainSeparator {
    DomainSeparator::new(&network.chain_id, &network.contract_address)
}

/// Signs orders on behalf of one maker key
pub struct OrderSigner {
    key: SigningKey,
    address: String,
}

impl OrderSigner {
    pub fn from_bytes(private_key: &[u8], address_prefix: &str) -> Result<Self> {
        let key = SigningKey::from_slice(private_key)
            .map_err(|e| ClientError::InvalidKey(e.to_string()))?;
        let public_key = key.verifying_key().to_sec1_bytes();
        let address = encode_address(address_prefix, &canonical_address(&public_key))?;
        debug!(%address, "signer loaded");
        Ok(Self { key, address })
    }

    /// Parse a hex key, with or without a `0x` prefix
    pub fn from_hex(private_key: &str, address_prefix: &str) -> Result<Self> {
        let bytes = hex::decode(private_key.trim_start_matches("0x"))
            .map_err(|e| ClientError::InvalidKey(e.to_string()))?;
        Self::from_bytes(&bytes, address_prefix)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let key = config
            .signer
            .private_key
            .as_deref()
            .ok_or_else(|| ClientError::InvalidKey("signer.private_key is not set".to_string()))?;
        Self::from_hex(key, &config.network.address_prefix)
    }

    /// Account address the contract recovers from this signer's signatures
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key(&self) -> Binary {
        Binary::from(self.key.verifying_key().to_sec1_bytes().to_vec())
    }

    /// Terms for an order made by this signer
    pub fn terms(
        &self,
        side: OrderSide,
        token_in: impl Into<String>,
        token_out: impl Into<String>,
        amount_in: u128,
        amount_out: u128,
        expiry: u64,
    ) -> OrderTerms {
        OrderTerms {
            maker: self.address.clone(),
            token_in: token_in.into(),
            token_out: token_out.into(),
            amount_in: Uint128::new(amount_in),
            amount_out: Uint128::new(amount_out),
            side,
            expiry,
        }
    }

    /// Sign `terms` for `domain`
    ///
    /// Terms are checked against `now` first, so an order the contract would
    /// reject at admission is never signed.
    pub fn sign(
        &self,
        terms: OrderTerms,
        domain: &DomainSeparator,
        now: u64,
    ) -> Result<SignedOrder> {
        if terms.maker != self.address {
            return Err(ClientError::MakerMismatch {
                maker: terms.maker,
                signer: self.address.clone(),
            });
        }
        terms.validate(now)?;

        let digest = terms.signing_digest(domain);
        let signature = sign_digest(&digest, &self.key.to_bytes())?;
        info!(
            maker = %self.address,
            order_id = %hex::encode(digest),
            side = terms.side.as_str(),
            "order signed"
        );

        Ok(SignedOrder {
            terms,
            signature: signature.to_binary(),
        })
    }
}

impl std::fmt::Debug for OrderSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

fn encode_address(prefix: &str, canonical: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(prefix).map_err(|e| ClientError::AddressError(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, canonical).map_err(|e| ClientError::AddressError(e.to_string()))
}
