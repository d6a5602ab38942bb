use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    Uint128,
};
use limit_orders_types::FeeSchedule;

use crate::admin::{
    execute_accept_controller, execute_propose_controller, execute_sweep_token,
    execute_update_default_router, execute_update_fees, execute_withdraw_fees,
};
use crate::error::ContractError;
use crate::guard::{self, RELEASE_GUARD_REPLY_ID};
use crate::handlers::{execute_cancel_order, execute_place_order, execute_place_signed_order};
use crate::helpers::validate_addr;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::queries::{
    query_config, query_fee_escrow, query_order, query_orders_by_maker, query_signing_digest,
};
use crate::settlement::{
    execute_order, execute_routed_order, finalize_routed_swap, ROUTED_SWAP_REPLY_ID,
};
use crate::state::{Config, CONFIG, HELD_EXECUTION_FEES};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.fee_denom.trim().is_empty() {
        return Err(ContractError::InvalidFeeDenom {});
    }

    let controller = match msg.controller {
        Some(c) => validate_addr(deps.api, "controller", &c)?,
        None => info.sender,
    };
    let default_router = msg
        .default_router
        .map(|r| validate_addr(deps.api, "default_router", &r))
        .transpose()?;

    let fees = FeeSchedule::new(msg.platform_fee, msg.execution_fee);
    fees.total()?;

    let config = Config {
        controller,
        fee_denom: msg.fee_denom,
        fees,
        default_router,
    };
    CONFIG.save(deps.storage, &config)?;
    HELD_EXECUTION_FEES.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("controller", config.controller)
        .add_attribute("fee_denom", config.fee_denom))
}

/// Every execute message runs under the reentrancy lock.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    guard::acquire(deps.storage)?;
    match dispatch(deps.branch(), env, info, msg) {
        Ok(response) => Ok(guard::hold_until_complete(deps.storage, response)),
        Err(err) => {
            guard::release(deps.storage);
            Err(err)
        }
    }
}

fn dispatch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::PlaceOrder {
            token_in,
            token_out,
            amount_in,
            amount_out_min,
            expiry,
            router,
        } => execute_place_order(
            deps,
            env,
            info,
            token_in,
            token_out,
            amount_in,
            amount_out_min,
            expiry,
            router,
        ),
        ExecuteMsg::PlaceSignedOrder { order } => {
            execute_place_signed_order(deps, env, info, order)
        }
        ExecuteMsg::CancelOrder { order_id } => execute_cancel_order(deps, info, order_id),
        ExecuteMsg::ExecuteOrder {
            order_id,
            fill_amount_in,
        } => execute_order(deps, env, info, order_id, fill_amount_in),
        ExecuteMsg::ExecuteRoutedOrder { order_id } => {
            execute_routed_order(deps, env, info, order_id)
        }
        ExecuteMsg::UpdateFees {
            platform_fee,
            execution_fee,
        } => execute_update_fees(deps, info, platform_fee, execution_fee),
        ExecuteMsg::UpdateDefaultRouter { router } => {
            execute_update_default_router(deps, info, router)
        }
        ExecuteMsg::WithdrawFees { amount, recipient } => {
            execute_withdraw_fees(deps, env, info, amount, recipient)
        }
        ExecuteMsg::SweepToken { token, recipient } => {
            execute_sweep_token(deps, env, info, token, recipient)
        }
        ExecuteMsg::ProposeController { controller } => {
            execute_propose_controller(deps, info, controller)
        }
        ExecuteMsg::AcceptController {} => execute_accept_controller(deps, info),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(mut deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        RELEASE_GUARD_REPLY_ID => {
            guard::release(deps.storage);
            Ok(Response::new().add_attribute("action", "release_guard"))
        }
        ROUTED_SWAP_REPLY_ID => {
            let response = finalize_routed_swap(deps.branch(), msg)?;
            guard::release(deps.storage);
            Ok(response)
        }
        id => Err(ContractError::UnknownReply { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let binary = match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?)?,
        QueryMsg::Order { order_id } => to_json_binary(&query_order(deps, order_id)?)?,
        QueryMsg::OrdersByMaker {
            maker,
            start_after,
            limit,
        } => to_json_binary(&query_orders_by_maker(deps, maker, start_after, limit)?)?,
        QueryMsg::FeeEscrow {} => to_json_binary(&query_fee_escrow(deps, env)?)?,
        QueryMsg::SigningDigest { terms } => to_json_binary(&query_signing_digest(env, terms))?,
    };
    Ok(binary)
}
