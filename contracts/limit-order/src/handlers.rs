use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response, Uint128};
use limit_orders_types::{check_terms, OrderSide, SignedOrder};

use crate::error::ContractError;
use crate::escrow::{collect_fees, hold_execution_fee, release_execution_fee};
use crate::helpers::{
    load_order, native_send_msg, order_placed_event, store_new_order, token_transfer_from_msg,
    token_transfer_msg, transition, validate_addr,
};
use crate::state::{Order, OrderStatus, Settlement, CONFIG, ORDERS};
use crate::validation::{check_allowance, domain_separator, verify_maker_signature, weak_order_id};

/// Admit a routed order on the strength of the sender's existing allowance.
#[allow(clippy::too_many_arguments)]
pub fn execute_place_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_in: String,
    token_out: String,
    amount_in: Uint128,
    amount_out_min: Uint128,
    expiry: u64,
    router: Option<String>,
) -> Result<Response, ContractError> {
    let now = env.block.time.seconds();
    check_terms(&token_in, &token_out, amount_in, amount_out_min, expiry, now)?;

    let token_in = validate_addr(deps.api, "token_in", &token_in)?;
    let token_out = validate_addr(deps.api, "token_out", &token_out)?;

    let config = CONFIG.load(deps.storage)?;
    let router = match router {
        Some(router) => validate_addr(deps.api, "router", &router)?,
        None => config
            .default_router
            .clone()
            .ok_or(ContractError::MissingRouter {})?,
    };

    check_allowance(
        &deps.querier,
        &token_in,
        &info.sender,
        &env.contract.address,
        amount_in,
    )?;
    let fees = collect_fees(&info.funds, &config)?;

    let order_id = weak_order_id(&info.sender, env.block.height, now);
    if ORDERS.has(deps.storage, &order_id) {
        return Err(ContractError::OrderAlreadyExists { id: order_id });
    }

    hold_execution_fee(deps.storage, fees.execution_fee)?;

    let order = Order {
        id: order_id.clone(),
        maker: info.sender,
        token_in,
        token_out,
        amount_in,
        amount_out: amount_out_min,
        remaining_in: amount_in,
        remaining_out: amount_out_min,
        filled_in: Uint128::zero(),
        filled_out: Uint128::zero(),
        fill_count: 0,
        amount_out_actual: None,
        settlement: Settlement::Routed { router },
        expiry,
        created_height: env.block.height,
        created_at: now,
        fees,
        status: OrderStatus::Open,
    };
    store_new_order(deps.storage, &order)?;

    Ok(Response::new()
        .add_event(order_placed_event(&order))
        .add_attribute("action", "place_order")
        .add_attribute("order_id", order_id)
        .add_attribute("maker", order.maker))
}

/// Admit a maker-signed order for direct settlement. Anyone may relay it; the signature
/// is the maker's authorization, and its digest becomes the order id.
pub fn execute_place_signed_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    signed: SignedOrder,
) -> Result<Response, ContractError> {
    let now = env.block.time.seconds();
    let terms = &signed.terms;
    terms.validate(now)?;

    let maker = validate_addr(deps.api, "maker", &terms.maker)?;
    let token_in = validate_addr(deps.api, "token_in", &terms.token_in)?;
    let token_out = validate_addr(deps.api, "token_out", &terms.token_out)?;

    let digest = terms.signing_digest(&domain_separator(&env));
    verify_maker_signature(deps.api, &digest, &signed.signature, &maker)?;

    let order_id = hex::encode(digest);
    if ORDERS.has(deps.storage, &order_id) {
        return Err(ContractError::SignatureReplayed { id: order_id });
    }

    let config = CONFIG.load(deps.storage)?;
    let fees = collect_fees(&info.funds, &config)?;
    hold_execution_fee(deps.storage, fees.execution_fee)?;

    let order = Order {
        id: order_id.clone(),
        maker,
        token_in,
        token_out,
        amount_in: terms.amount_in,
        amount_out: terms.amount_out,
        remaining_in: terms.amount_in,
        remaining_out: terms.amount_out,
        filled_in: Uint128::zero(),
        filled_out: Uint128::zero(),
        fill_count: 0,
        amount_out_actual: None,
        settlement: Settlement::Direct { side: terms.side },
        expiry: terms.expiry,
        created_height: env.block.height,
        created_at: now,
        fees,
        status: OrderStatus::Open,
    };
    store_new_order(deps.storage, &order)?;

    let mut response = Response::new()
        .add_event(order_placed_event(&order))
        .add_attribute("action", "place_signed_order")
        .add_attribute("order_id", order_id)
        .add_attribute("maker", &order.maker)
        .add_attribute("relayer", info.sender);

    // Sell side is escrowed up front.
    if terms.side == OrderSide::Sell {
        response = response.add_message(token_transfer_from_msg(
            &order.token_in,
            &order.maker,
            &env.contract.address,
            order.amount_in,
        )?);
    }

    Ok(response)
}

/// Cancel an active order. Half the execution fee goes back to the maker, the whole fee
/// leaves the held total, and any escrowed sell-side tokens are returned.
pub fn execute_cancel_order(
    deps: DepsMut,
    info: MessageInfo,
    order_id: String,
) -> Result<Response, ContractError> {
    let mut order = load_order(deps.storage, &order_id)?;

    if info.sender != order.maker {
        return Err(ContractError::Unauthorized {});
    }
    if !order.is_active() {
        return Err(ContractError::OrderInactive { id: order_id });
    }

    transition(&mut order, OrderStatus::Cancelled)?;
    release_execution_fee(deps.storage, order.fees.execution_fee)?;
    ORDERS.save(deps.storage, &order_id, &order)?;

    let config = CONFIG.load(deps.storage)?;
    let refund = order.fees.cancellation_refund();
    let forfeited = order.fees.cancellation_forfeit();

    let mut response = Response::new();
    if let Some(send) = native_send_msg(&order.maker, refund, &config.fee_denom) {
        response = response.add_message(send);
    }

    let escrow_returned = match &order.settlement {
        Settlement::Direct {
            side: OrderSide::Sell,
        } if !order.remaining_in.is_zero() => {
            response = response.add_message(token_transfer_msg(
                &order.token_in,
                &order.maker,
                order.remaining_in,
            )?);
            order.remaining_in
        }
        _ => Uint128::zero(),
    };

    Ok(response
        .add_event(
            Event::new("limit_order_cancelled")
                .add_attribute("order_id", &order_id)
                .add_attribute("maker", &order.maker)
                .add_attribute("fee_refunded", refund)
                .add_attribute("fee_forfeited", forfeited)
                .add_attribute("escrow_returned", escrow_returned),
        )
        .add_attribute("action", "cancel_order")
        .add_attribute("order_id", order_id))
}
