use cosmwasm_schema::cw_serde;
use cosmwasm_std::{CheckedMultiplyRatioError, OverflowError, Uint128};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FillError {
    #[error("fill amount must be greater than zero")]
    ZeroFill,

    #[error("fill of {requested} exceeds remaining amount {remaining}")]
    ExceedsRemaining {
        requested: Uint128,
        remaining: Uint128,
    },

    #[error("fill of {amount_in} rounds down to zero output")]
    ZeroOutput { amount_in: Uint128 },

    #[error("{0}")]
    Ratio(#[from] CheckedMultiplyRatioError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),
}

/// Outcome of filling part of an order's remaining quantity
#[cw_serde]
#[derive(Copy)]
pub struct Fill {
    pub amount_in: Uint128,
    pub amount_out: Uint128,
    pub remaining_in: Uint128,
    pub remaining_out: Uint128,
}

impl Fill {
    /// True when nothing is left to fill
    pub fn completes(&self) -> bool {
        self.remaining_in.is_zero()
    }
}

/// Price a fill against the order's remaining terms.
///
/// `amount_out = floor(fill_in * remaining_out / remaining_in)`. Rounding always goes
/// toward zero, so dust stays with the side the remaining amounts were computed for.
/// A fill of the entire remaining input always takes the entire remaining output.
pub fn quote_fill(
    fill_in: Uint128,
    remaining_in: Uint128,
    remaining_out: Uint128,
) -> Result<Fill, FillError> {
    if fill_in.is_zero() {
        return Err(FillError::ZeroFill);
    }
    if fill_in > remaining_in {
        return Err(FillError::ExceedsRemaining {
            requested: fill_in,
            remaining: remaining_in,
        });
    }

    let amount_out = fill_in.checked_multiply_ratio(remaining_out, remaining_in)?;
    if amount_out.is_zero() {
        return Err(FillError::ZeroOutput { amount_in: fill_in });
    }

    Ok(Fill {
        amount_in: fill_in,
        amount_out,
        remaining_in: remaining_in.checked_sub(fill_in)?,
        remaining_out: remaining_out.checked_sub(amount_out)?,
    })
}
