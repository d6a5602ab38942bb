//! Execution fee escrow.
//!
//! The contract's native balance is split into two parts: execution fees held for
//! active orders (tracked in `HELD_EXECUTION_FEES`) and everything else, which the
//! controller may withdraw. Every withdrawal is checked against
//! `withdrawable = balance - held`.

use cosmwasm_std::{Addr, Coin, Deps, Storage, Uint128};
use limit_orders_types::FeeSchedule;

use crate::error::ContractError;
use crate::state::{Config, HELD_EXECUTION_FEES};

/// Require `funds` to be exactly the current fee total and return the snapshot to store
/// on the new order.
pub fn collect_fees(funds: &[Coin], config: &Config) -> Result<FeeSchedule, ContractError> {
    let fees = config.fees;
    let total = fees.total()?;

    if total.is_zero() {
        if funds.is_empty() {
            return Ok(fees);
        }
        return Err(ContractError::InvalidFunds {
            expected: "no funds".to_string(),
            got: describe_funds(funds),
        });
    }

    match funds {
        [coin] if coin.denom == config.fee_denom && coin.amount == total => Ok(fees),
        _ => Err(ContractError::InvalidFunds {
            expected: format!("{}{}", total, config.fee_denom),
            got: describe_funds(funds),
        }),
    }
}

pub fn held_total(storage: &dyn Storage) -> Result<Uint128, ContractError> {
    Ok(HELD_EXECUTION_FEES
        .may_load(storage)?
        .unwrap_or_default())
}

/// Add an order's execution fee to the held total
pub fn hold_execution_fee(
    storage: &mut dyn Storage,
    execution_fee: Uint128,
) -> Result<Uint128, ContractError> {
    let held = held_total(storage)?.checked_add(execution_fee)?;
    HELD_EXECUTION_FEES.save(storage, &held)?;
    Ok(held)
}

/// Remove an order's execution fee from the held total once the order leaves the
/// active set. Always the full original fee, whatever part of it is refunded.
pub fn release_execution_fee(
    storage: &mut dyn Storage,
    execution_fee: Uint128,
) -> Result<Uint128, ContractError> {
    let held = held_total(storage)?.checked_sub(execution_fee)?;
    HELD_EXECUTION_FEES.save(storage, &held)?;
    Ok(held)
}

pub struct EscrowBalance {
    pub held: Uint128,
    pub balance: Uint128,
    pub withdrawable: Uint128,
}

pub fn escrow_balance(
    deps: Deps,
    contract: &Addr,
    config: &Config,
) -> Result<EscrowBalance, ContractError> {
    let held = held_total(deps.storage)?;
    let balance = deps
        .querier
        .query_balance(contract, &config.fee_denom)?
        .amount;
    // held <= balance always holds; a violation surfaces as an arithmetic error.
    let withdrawable = balance.checked_sub(held)?;

    Ok(EscrowBalance {
        held,
        balance,
        withdrawable,
    })
}

fn describe_funds(funds: &[Coin]) -> String {
    if funds.is_empty() {
        return "no funds".to_string();
    }
    funds
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
