//! Value movement for both settlement strategies.
//!
//! Every path commits the order's new state before any token message is dispatched.
//! Token and router messages run after the handler returns; any failure among them
//! reverts the whole transaction, bookkeeping included.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Reply, Response, SubMsg, Uint128};
use limit_orders_types::{quote_fill, OrderSide, RouterExecuteMsg};

use crate::error::ContractError;
use crate::escrow::release_execution_fee;
use crate::helpers::{
    load_order, native_send_msg, order_executed_event, query_token_balance, router_swap_msg,
    token_approve_msg, token_transfer_from_msg, token_transfer_msg, transition,
};
use crate::state::{Order, OrderStatus, PendingSwap, Settlement, CONFIG, ORDERS, PENDING_SWAP};

/// Reply id of the router swap sub-message
pub const ROUTED_SWAP_REPLY_ID: u64 = 2;

fn ensure_executable(order: &Order, now: u64) -> Result<(), ContractError> {
    if !order.is_active() {
        return Err(ContractError::OrderInactive {
            id: order.id.clone(),
        });
    }
    if order.is_expired(now) {
        return Err(ContractError::OrderExpired {
            id: order.id.clone(),
            expiry: order.expiry,
        });
    }
    Ok(())
}

/// Fill `fill_amount_in` of a direct order against the sender.
pub fn execute_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    order_id: String,
    fill_amount_in: Uint128,
) -> Result<Response, ContractError> {
    let mut order = load_order(deps.storage, &order_id)?;
    let side = match order.settlement {
        Settlement::Direct { side } => side,
        Settlement::Routed { .. } => {
            return Err(ContractError::WrongSettlement {
                id: order_id,
                expected: "direct".to_string(),
            })
        }
    };
    ensure_executable(&order, env.block.time.seconds())?;

    let fill = quote_fill(fill_amount_in, order.remaining_in, order.remaining_out)?;

    order.remaining_in = fill.remaining_in;
    order.remaining_out = fill.remaining_out;
    order.filled_in = order.filled_in.checked_add(fill.amount_in)?;
    order.filled_out = order.filled_out.checked_add(fill.amount_out)?;
    order.fill_count += 1;

    let completes = fill.completes();
    if completes {
        transition(&mut order, OrderStatus::Filled)?;
        release_execution_fee(deps.storage, order.fees.execution_fee)?;
    } else {
        transition(&mut order, OrderStatus::PartiallyFilled)?;
    }
    ORDERS.save(deps.storage, &order_id, &order)?;

    let taker = info.sender;
    let mut response = Response::new();
    match side {
        OrderSide::Buy => {
            response = response
                .add_message(token_transfer_from_msg(
                    &order.token_in,
                    &taker,
                    &order.maker,
                    fill.amount_in,
                )?)
                .add_message(token_transfer_from_msg(
                    &order.token_out,
                    &order.maker,
                    &taker,
                    fill.amount_out,
                )?);
        }
        OrderSide::Sell => {
            response = response
                .add_message(token_transfer_msg(&order.token_in, &taker, fill.amount_in)?)
                .add_message(token_transfer_from_msg(
                    &order.token_out,
                    &taker,
                    &order.maker,
                    fill.amount_out,
                )?);
        }
    }

    let mut fee_refunded = Uint128::zero();
    if completes {
        let config = CONFIG.load(deps.storage)?;
        if let Some(send) =
            native_send_msg(&taker, order.fees.execution_fee, &config.fee_denom)
        {
            response = response.add_message(send);
            fee_refunded = order.fees.execution_fee;
        }
    }

    Ok(response
        .add_event(
            order_executed_event(&order_id, &taker, fill.amount_in, fill.amount_out)
                .add_attribute("strategy", "direct")
                .add_attribute("remaining_in", order.remaining_in)
                .add_attribute("remaining_out", order.remaining_out)
                .add_attribute("status", order.status.as_str()),
        )
        .add_attribute("action", "execute_order")
        .add_attribute("order_id", order_id)
        .add_attribute("fill_amount_in", fill.amount_in)
        .add_attribute("fill_amount_out", fill.amount_out)
        .add_attribute("fee_refunded", fee_refunded))
}

/// Settle a routed order in full: pull the maker's input into the contract, approve the
/// router for exactly that amount and swap with the maker as recipient. The output is
/// measured in `finalize_routed_swap` once the router has run.
pub fn execute_routed_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    order_id: String,
) -> Result<Response, ContractError> {
    let mut order = load_order(deps.storage, &order_id)?;
    let router = match &order.settlement {
        Settlement::Routed { router } => router.clone(),
        Settlement::Direct { .. } => {
            return Err(ContractError::WrongSettlement {
                id: order_id,
                expected: "routed".to_string(),
            })
        }
    };
    let now = env.block.time.seconds();
    ensure_executable(&order, now)?;

    let amount_in = order.remaining_in;
    let amount_out_min = order.remaining_out;
    let balance_before = query_token_balance(&deps.querier, &order.token_out, &order.maker)?;

    order.remaining_in = Uint128::zero();
    order.filled_in = order.filled_in.checked_add(amount_in)?;
    order.fill_count += 1;
    transition(&mut order, OrderStatus::Filled)?;
    release_execution_fee(deps.storage, order.fees.execution_fee)?;
    ORDERS.save(deps.storage, &order_id, &order)?;

    let taker = info.sender;
    PENDING_SWAP.save(
        deps.storage,
        &PendingSwap {
            order_id: order_id.clone(),
            taker: taker.clone(),
            recipient: order.maker.clone(),
            token_out: order.token_out.clone(),
            balance_before,
            amount_out_min,
        },
    )?;

    let swap = RouterExecuteMsg::SwapExactTokensForTokensSupportingFeeOnTransferTokens {
        amount_in,
        amount_out_min,
        path: vec![order.token_in.to_string(), order.token_out.to_string()],
        to: order.maker.to_string(),
        deadline: now,
    };

    let mut response = Response::new()
        .add_message(token_transfer_from_msg(
            &order.token_in,
            &order.maker,
            &env.contract.address,
            amount_in,
        )?)
        .add_message(token_approve_msg(&order.token_in, &router, amount_in)?);

    let config = CONFIG.load(deps.storage)?;
    if let Some(send) = native_send_msg(&taker, order.fees.execution_fee, &config.fee_denom) {
        response = response.add_message(send);
    }

    // Last message, so its reply is the final step of the transaction.
    Ok(response
        .add_submessage(SubMsg::reply_on_success(
            router_swap_msg(&router, &swap)?,
            ROUTED_SWAP_REPLY_ID,
        ))
        .add_attribute("action", "execute_routed_order")
        .add_attribute("order_id", order_id)
        .add_attribute("taker", taker)
        .add_attribute("router", router)
        .add_attribute("amount_in", amount_in)
        .add_attribute("amount_out_min", amount_out_min))
}

/// Measure what the router delivered by balance difference and record it on the order.
/// A shortfall against the order's minimum aborts the transaction.
pub fn finalize_routed_swap(deps: DepsMut, reply: Reply) -> Result<Response, ContractError> {
    reply
        .result
        .into_result()
        .map_err(|reason| ContractError::SwapFailed { reason })?;

    let pending = PENDING_SWAP
        .may_load(deps.storage)?
        .ok_or(ContractError::MissingPendingSwap {})?;
    PENDING_SWAP.remove(deps.storage);

    let balance_after =
        query_token_balance(&deps.querier, &pending.token_out, &pending.recipient)?;
    let received = balance_after.checked_sub(pending.balance_before)?;
    if received < pending.amount_out_min {
        return Err(ContractError::SlippageExceeded {
            minimum: pending.amount_out_min,
            received,
        });
    }

    let mut order = load_order(deps.storage, &pending.order_id)?;
    order.remaining_out = Uint128::zero();
    order.filled_out = order.filled_out.checked_add(received)?;
    order.amount_out_actual = Some(received);
    ORDERS.save(deps.storage, &pending.order_id, &order)?;

    Ok(Response::new()
        .add_event(
            order_executed_event(&pending.order_id, &pending.taker, order.filled_in, received)
                .add_attribute("strategy", "routed")
                .add_attribute("amount_out_min", pending.amount_out_min),
        )
        .add_attribute("action", "finalize_routed_swap")
        .add_attribute("order_id", pending.order_id)
        .add_attribute("amount_out_actual", received))
}
