//! Controller-gated operations.

use cosmwasm_std::{Addr, DepsMut, Env, Event, MessageInfo, Response, Storage, Uint128};
use limit_orders_types::FeeSchedule;

use crate::error::ContractError;
use crate::escrow::escrow_balance;
use crate::helpers::{native_send_msg, query_token_balance, token_transfer_msg, validate_addr};
use crate::state::{Config, CONFIG, PENDING_CONTROLLER};

fn ensure_controller(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.controller {
        return Err(ContractError::Unauthorized {});
    }
    Ok(config)
}

/// New fees apply to orders placed afterwards; existing orders keep their snapshot.
pub fn execute_update_fees(
    deps: DepsMut,
    info: MessageInfo,
    platform_fee: Uint128,
    execution_fee: Uint128,
) -> Result<Response, ContractError> {
    let mut config = ensure_controller(deps.storage, &info.sender)?;

    let fees = FeeSchedule::new(platform_fee, execution_fee);
    // A schedule whose total overflows could never be paid.
    fees.total()?;

    let previous = config.fees;
    config.fees = fees;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(
            Event::new("limit_order_fees_updated")
                .add_attribute("previous_platform_fee", previous.platform_fee)
                .add_attribute("previous_execution_fee", previous.execution_fee)
                .add_attribute("platform_fee", platform_fee)
                .add_attribute("execution_fee", execution_fee),
        )
        .add_attribute("action", "update_fees"))
}

pub fn execute_update_default_router(
    deps: DepsMut,
    info: MessageInfo,
    router: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = ensure_controller(deps.storage, &info.sender)?;

    config.default_router = router
        .map(|r| validate_addr(deps.api, "router", &r))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    let router = config
        .default_router
        .map(|r| r.to_string())
        .unwrap_or_else(|| "none".to_string());
    Ok(Response::new()
        .add_attribute("action", "update_default_router")
        .add_attribute("router", router))
}

/// Withdraw fee surplus. Funds held for active orders are never touched.
pub fn execute_withdraw_fees(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Option<Uint128>,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    let config = ensure_controller(deps.storage, &info.sender)?;
    let recipient = match recipient {
        Some(r) => validate_addr(deps.api, "recipient", &r)?,
        None => info.sender,
    };

    let escrow = escrow_balance(deps.as_ref(), &env.contract.address, &config)?;
    let amount = amount.unwrap_or(escrow.withdrawable);
    if amount > escrow.withdrawable {
        return Err(ContractError::InsufficientWithdrawable {
            requested: amount,
            available: escrow.withdrawable,
        });
    }
    let send = native_send_msg(&recipient, amount, &config.fee_denom).ok_or_else(|| {
        ContractError::NothingToTransfer {
            what: config.fee_denom.clone(),
        }
    })?;

    Ok(Response::new()
        .add_message(send)
        .add_event(
            Event::new("limit_order_fees_withdrawn")
                .add_attribute("recipient", &recipient)
                .add_attribute("amount", amount)
                .add_attribute("denom", &config.fee_denom)
                .add_attribute("held", escrow.held),
        )
        .add_attribute("action", "withdraw_fees")
        .add_attribute("amount", amount))
}

/// Move the contract's whole balance of `token` out. Unrestricted: this includes tokens
/// escrowed for open sell orders.
pub fn execute_sweep_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    recipient: Option<String>,
) -> Result<Response, ContractError> {
    ensure_controller(deps.storage, &info.sender)?;
    let token = validate_addr(deps.api, "token", &token)?;
    let recipient = match recipient {
        Some(r) => validate_addr(deps.api, "recipient", &r)?,
        None => info.sender,
    };

    let balance = query_token_balance(&deps.querier, &token, &env.contract.address)?;
    if balance.is_zero() {
        return Err(ContractError::NothingToTransfer {
            what: token.to_string(),
        });
    }

    Ok(Response::new()
        .add_message(token_transfer_msg(&token, &recipient, balance)?)
        .add_event(
            Event::new("limit_order_token_swept")
                .add_attribute("token", &token)
                .add_attribute("recipient", &recipient)
                .add_attribute("amount", balance),
        )
        .add_attribute("action", "sweep_token")
        .add_attribute("token", token))
}

pub fn execute_propose_controller(
    deps: DepsMut,
    info: MessageInfo,
    controller: String,
) -> Result<Response, ContractError> {
    ensure_controller(deps.storage, &info.sender)?;
    let proposed = validate_addr(deps.api, "controller", &controller)?;
    PENDING_CONTROLLER.save(deps.storage, &proposed)?;

    Ok(Response::new()
        .add_event(
            Event::new("limit_order_controller_proposed")
                .add_attribute("controller", &info.sender)
                .add_attribute("proposed", &proposed),
        )
        .add_attribute("action", "propose_controller"))
}

pub fn execute_accept_controller(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_CONTROLLER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingController {})?;
    if info.sender != pending {
        return Err(ContractError::Unauthorized {});
    }

    let mut config = CONFIG.load(deps.storage)?;
    let previous = std::mem::replace(&mut config.controller, pending);
    CONFIG.save(deps.storage, &config)?;
    PENDING_CONTROLLER.remove(deps.storage);

    Ok(Response::new()
        .add_event(
            Event::new("limit_order_controller_accepted")
                .add_attribute("previous", previous)
                .add_attribute("controller", &config.controller),
        )
        .add_attribute("action", "accept_controller"))
}
