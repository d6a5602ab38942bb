use cosmwasm_schema::cw_serde;
use cosmwasm_std::{OverflowError, Uint128};

/// Flat fees, in the native fee denomination, charged when an order is placed.
///
/// Each order keeps its own copy taken at placement, so later rate changes never touch
/// orders that already exist.
#[cw_serde]
#[derive(Copy, Default)]
pub struct FeeSchedule {
    /// Retained by the operator, withdrawable immediately
    pub platform_fee: Uint128,
    /// Held in escrow until the order is executed or cancelled
    pub execution_fee: Uint128,
}

impl FeeSchedule {
    pub fn new(platform_fee: impl Into<Uint128>, execution_fee: impl Into<Uint128>) -> Self {
        Self {
            platform_fee: platform_fee.into(),
            execution_fee: execution_fee.into(),
        }
    }

    /// Exact amount a maker must attach when placing an order
    pub fn total(&self) -> Result<Uint128, OverflowError> {
        self.platform_fee.checked_add(self.execution_fee)
    }

    /// Half of the execution fee, rounded down, goes back to the maker on cancellation.
    pub fn cancellation_refund(&self) -> Uint128 {
        self.execution_fee / Uint128::new(2)
    }

    /// Part of the execution fee kept as platform revenue on cancellation
    pub fn cancellation_forfeit(&self) -> Uint128 {
        self.execution_fee - self.cancellation_refund()
    }
}
