use cosmwasm_std::{
    to_json_binary, Addr, Api, BankMsg, Coin, CosmosMsg, Event, QuerierWrapper, StdResult,
    Storage, Uint128, WasmMsg,
};
use limit_orders_types::{
    AllowanceResponse, BalanceResponse, RouterExecuteMsg, TokenExecuteMsg, TokenQueryMsg,
};

use crate::error::ContractError;
use crate::msg::OrderResponse;
use crate::state::{Order, OrderStatus, Settlement, MAKER_ORDERS, ORDERS};

/// Validate a user supplied address, reporting which field was wrong
pub fn validate_addr(api: &dyn Api, field: &str, addr: &str) -> Result<Addr, ContractError> {
    api.addr_validate(addr)
        .map_err(|e| ContractError::InvalidAddress {
            field: field.to_string(),
            reason: e.to_string(),
        })
}

pub fn load_order(storage: &dyn Storage, order_id: &str) -> Result<Order, ContractError> {
    ORDERS
        .may_load(storage, order_id)?
        .ok_or_else(|| ContractError::OrderNotFound {
            id: order_id.to_string(),
        })
}

/// Persist a newly admitted order and index it under its maker
pub fn store_new_order(storage: &mut dyn Storage, order: &Order) -> StdResult<()> {
    ORDERS.save(storage, &order.id, order)?;
    MAKER_ORDERS.save(storage, (&order.maker, &order.id), &true)
}

/// Move an order to `target`, refusing transitions out of terminal states
pub fn transition(order: &mut Order, target: OrderStatus) -> Result<(), ContractError> {
    if !order.status.can_transition_to(&target) {
        return Err(ContractError::InvalidStateTransition {
            from: order.status.as_str().to_string(),
            to: target.as_str().to_string(),
        });
    }
    order.status = target;
    Ok(())
}

pub fn token_transfer_msg(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    token_execute(
        token,
        &TokenExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn token_transfer_from_msg(
    token: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    token_execute(
        token,
        &TokenExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn token_approve_msg(token: &Addr, spender: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    token_execute(
        token,
        &TokenExecuteMsg::IncreaseAllowance {
            spender: spender.to_string(),
            amount,
        },
    )
}

fn token_execute(token: &Addr, msg: &TokenExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }
    .into())
}

pub fn router_swap_msg(router: &Addr, swap: &RouterExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: router.to_string(),
        msg: to_json_binary(swap)?,
        funds: vec![],
    }
    .into())
}

/// Native transfer, or nothing when the amount is zero
pub fn native_send_msg(recipient: &Addr, amount: Uint128, denom: &str) -> Option<CosmosMsg> {
    if amount.is_zero() {
        return None;
    }
    Some(
        BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![Coin {
                denom: denom.to_string(),
                amount,
            }],
        }
        .into(),
    )
}

pub fn query_token_balance(
    querier: &QuerierWrapper,
    token: &Addr,
    holder: &Addr,
) -> StdResult<Uint128> {
    let resp: BalanceResponse = querier.query_wasm_smart(
        token,
        &TokenQueryMsg::Balance {
            address: holder.to_string(),
        },
    )?;
    Ok(resp.balance)
}

pub fn query_token_allowance(
    querier: &QuerierWrapper,
    token: &Addr,
    owner: &Addr,
    spender: &Addr,
) -> StdResult<Uint128> {
    let resp: AllowanceResponse = querier.query_wasm_smart(
        token,
        &TokenQueryMsg::Allowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
        },
    )?;
    Ok(resp.allowance)
}

pub fn order_placed_event(order: &Order) -> Event {
    let mut event = Event::new("limit_order_placed")
        .add_attribute("order_id", &order.id)
        .add_attribute("maker", &order.maker)
        .add_attribute("token_in", &order.token_in)
        .add_attribute("token_out", &order.token_out)
        .add_attribute("amount_in", order.amount_in)
        .add_attribute("amount_out", order.amount_out)
        .add_attribute("expiry", order.expiry.to_string())
        .add_attribute("strategy", order.settlement.as_str());
    match &order.settlement {
        Settlement::Direct { side } => event = event.add_attribute("side", side.as_str()),
        Settlement::Routed { router } => event = event.add_attribute("router", router),
    }
    event
}

pub fn order_executed_event(
    order_id: &str,
    taker: &Addr,
    amount_in: Uint128,
    amount_out: Uint128,
) -> Event {
    Event::new("limit_order_executed")
        .add_attribute("order_id", order_id)
        .add_attribute("taker", taker)
        .add_attribute("amount_in", amount_in)
        .add_attribute("amount_out", amount_out)
}

pub fn order_to_response(order: Order) -> OrderResponse {
    let (side, router) = match &order.settlement {
        Settlement::Direct { side } => (Some(*side), None),
        Settlement::Routed { router } => (None, Some(router.to_string())),
    };

    OrderResponse {
        active: order.is_active(),
        strategy: order.settlement.as_str().to_string(),
        status: order.status.as_str().to_string(),
        id: order.id,
        maker: order.maker.to_string(),
        token_in: order.token_in.to_string(),
        token_out: order.token_out.to_string(),
        amount_in: order.amount_in,
        amount_out: order.amount_out,
        remaining_in: order.remaining_in,
        remaining_out: order.remaining_out,
        filled_in: order.filled_in,
        filled_out: order.filled_out,
        fill_count: order.fill_count,
        amount_out_actual: order.amount_out_actual,
        side,
        router,
        expiry: order.expiry,
        created_height: order.created_height,
        created_at: order.created_at,
        platform_fee: order.fees.platform_fee,
        execution_fee: order.fees.execution_fee,
    }
}
