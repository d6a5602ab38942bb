use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};
use thiserror::Error;

use crate::signing::{hash_bytes, hashed_signing_message, DomainSeparator};

/// Errors raised while checking order terms before admission
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    #[error("address is empty: {field}")]
    EmptyAddress { field: String },

    #[error("token_in and token_out must differ: {token}")]
    IdenticalTokens { token: String },

    #[error("amount must be greater than zero: {field}")]
    ZeroAmount { field: String },

    #[error("expiry {expiry} is not after current time {now}")]
    ExpiryNotInFuture { expiry: u64, now: u64 },
}

/// Direction of a directly settled order, from the maker's point of view
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum OrderSide {
    /// Maker receives `token_in` from the taker and pays `token_out`
    Buy,
    /// Maker's `token_in` is escrowed at placement and paid out to takers
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }

    fn tag(&self) -> u8 {
        match self {
            OrderSide::Buy => 0,
            OrderSide::Sell => 1,
        }
    }
}

/// The exact field tuple a maker signs
#[cw_serde]
pub struct OrderTerms {
    pub maker: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: Uint128,
    pub amount_out: Uint128,
    pub side: OrderSide,
    /// Seconds since epoch
    pub expiry: u64,
}

impl OrderTerms {
    pub const TYPE_STRING: &'static str = "LimitOrder(string maker,string tokenIn,string tokenOut,uint128 amountIn,uint128 amountOut,uint8 side,uint64 expiry)";

    /// Field sanity checks shared by every admission path
    pub fn validate(&self, now: u64) -> Result<(), OrderError> {
        if self.maker.is_empty() {
            return Err(OrderError::EmptyAddress {
                field: "maker".to_string(),
            });
        }
        check_terms(
            &self.token_in,
            &self.token_out,
            self.amount_in,
            self.amount_out,
            self.expiry,
            now,
        )
    }

    /// Struct hash over every signed field, each slot 32 bytes wide.
    pub fn hash_struct(&self) -> [u8; 32] {
        let mut hash_data = [0u8; 256];
        hash_data[0..32].copy_from_slice(&hash_bytes(Self::TYPE_STRING.as_bytes()));
        hash_data[32..64].copy_from_slice(&hash_bytes(self.maker.as_bytes()));
        hash_data[64..96].copy_from_slice(&hash_bytes(self.token_in.as_bytes()));
        hash_data[96..128].copy_from_slice(&hash_bytes(self.token_out.as_bytes()));
        hash_data[144..160].copy_from_slice(&self.amount_in.u128().to_be_bytes());
        hash_data[176..192].copy_from_slice(&self.amount_out.u128().to_be_bytes());
        hash_data[223] = self.side.tag();
        hash_data[248..256].copy_from_slice(&self.expiry.to_be_bytes());
        hash_bytes(&hash_data)
    }

    /// Digest the maker signs, bound to one deployment through `domain`
    pub fn signing_digest(&self, domain: &DomainSeparator) -> [u8; 32] {
        hashed_signing_message(domain, &self.hash_struct())
    }
}

/// Order terms together with the maker's 65 byte recoverable signature
#[cw_serde]
pub struct SignedOrder {
    pub terms: OrderTerms,
    pub signature: Binary,
}

/// Checks every admission path applies to the token pair, amounts and expiry.
pub fn check_terms(
    token_in: &str,
    token_out: &str,
    amount_in: Uint128,
    amount_out: Uint128,
    expiry: u64,
    now: u64,
) -> Result<(), OrderError> {
    if token_in.is_empty() {
        return Err(OrderError::EmptyAddress {
            field: "token_in".to_string(),
        });
    }
    if token_out.is_empty() {
        return Err(OrderError::EmptyAddress {
            field: "token_out".to_string(),
        });
    }
    if token_in == token_out {
        return Err(OrderError::IdenticalTokens {
            token: token_in.to_string(),
        });
    }
    if amount_in.is_zero() {
        return Err(OrderError::ZeroAmount {
            field: "amount_in".to_string(),
        });
    }
    if amount_out.is_zero() {
        return Err(OrderError::ZeroAmount {
            field: "amount_out".to_string(),
        });
    }
    if expiry <= now {
        return Err(OrderError::ExpiryNotInFuture { expiry, now });
    }
    Ok(())
}
