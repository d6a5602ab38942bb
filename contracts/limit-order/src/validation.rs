//! Admission checks: order identifiers, signer recovery and allowance proofs.

use cosmwasm_std::{Addr, Api, Binary, Env, QuerierWrapper, Uint128};
use limit_orders_types::{
    canonical_address, compress_public_key, hash_bytes, DomainSeparator, RecoverableSignature,
};

use crate::error::ContractError;
use crate::helpers::query_token_allowance;

const ORDER_ID_PREFIX: &[u8] = b"limit-order-id";

/// Identifier for allowance-admitted orders: `sha256(prefix || len(maker) || maker ||
/// height || time)`. Two orders from one maker in the same block and second hash to
/// the same id; the caller must reject the second.
pub fn weak_order_id(maker: &Addr, height: u64, time: u64) -> String {
    let maker = maker.as_bytes();
    let mut preimage = Vec::with_capacity(ORDER_ID_PREFIX.len() + 8 + maker.len() + 16);
    preimage.extend_from_slice(ORDER_ID_PREFIX);
    preimage.extend_from_slice(&(maker.len() as u64).to_be_bytes());
    preimage.extend_from_slice(maker);
    preimage.extend_from_slice(&height.to_be_bytes());
    preimage.extend_from_slice(&time.to_be_bytes());
    hex::encode(hash_bytes(&preimage))
}

/// Domain of this deployment: chain id plus contract address.
pub fn domain_separator(env: &Env) -> DomainSeparator {
    DomainSeparator::new(&env.block.chain_id, env.contract.address.as_str())
}

/// Recover the signer of `digest` and require it to be `maker`.
///
/// Malformed signatures and failed recoveries are authorization failures.
pub fn verify_maker_signature(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &Binary,
    maker: &Addr,
) -> Result<(), ContractError> {
    let signature = RecoverableSignature::from_slice(signature.as_slice()).map_err(|e| {
        ContractError::InvalidSignature {
            reason: e.to_string(),
        }
    })?;

    let public_key = api
        .secp256k1_recover_pubkey(digest, &signature.rs, signature.recovery_id)
        .map_err(|e| ContractError::InvalidSignature {
            reason: e.to_string(),
        })?;
    let compressed =
        compress_public_key(&public_key).map_err(|e| ContractError::InvalidSignature {
            reason: e.to_string(),
        })?;
    let signer = canonical_address(&compressed);

    let expected = api.addr_canonicalize(maker.as_str())?;
    if expected.as_slice() != signer.as_slice() {
        return Err(ContractError::SignerMismatch {
            maker: maker.to_string(),
        });
    }
    Ok(())
}

/// Require `owner` to have approved `spender` for at least `required` of `token`.
pub fn check_allowance(
    querier: &QuerierWrapper,
    token: &Addr,
    owner: &Addr,
    spender: &Addr,
    required: Uint128,
) -> Result<(), ContractError> {
    let available = query_token_allowance(querier, token, owner, spender)?;
    if available < required {
        return Err(ContractError::InsufficientAllowance {
            required,
            available,
        });
    }
    Ok(())
}
