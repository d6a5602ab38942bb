use cosmwasm_std::{Deps, Env, Order as SortOrder};
use cw_storage_plus::Bound;
use limit_orders_types::OrderTerms;

use crate::error::ContractError;
use crate::escrow::escrow_balance;
use crate::helpers::{load_order, order_to_response, validate_addr};
use crate::msg::{
    ConfigResponse, FeeEscrowResponse, OrderResponse, OrdersResponse, SigningDigestResponse,
};
use crate::state::{CONFIG, MAKER_ORDERS, ORDERS, PENDING_CONTROLLER};
use crate::validation::domain_separator;

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

pub fn query_config(deps: Deps) -> Result<ConfigResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let pending = PENDING_CONTROLLER.may_load(deps.storage)?;
    Ok(ConfigResponse {
        controller: config.controller.to_string(),
        pending_controller: pending.map(|a| a.to_string()),
        fee_denom: config.fee_denom,
        platform_fee: config.fees.platform_fee,
        execution_fee: config.fees.execution_fee,
        default_router: config.default_router.map(|a| a.to_string()),
    })
}

pub fn query_order(deps: Deps, order_id: String) -> Result<OrderResponse, ContractError> {
    let order = load_order(deps.storage, &order_id)?;
    Ok(order_to_response(order))
}

/// Orders placed by `maker`, in id order
pub fn query_orders_by_maker(
    deps: Deps,
    maker: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> Result<OrdersResponse, ContractError> {
    let maker = validate_addr(deps.api, "maker", &maker)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let orders = MAKER_ORDERS
        .prefix(&maker)
        .keys(deps.storage, start, None, SortOrder::Ascending)
        .take(limit)
        .map(|id| -> Result<OrderResponse, ContractError> {
            let id = id?;
            Ok(order_to_response(ORDERS.load(deps.storage, &id)?))
        })
        .collect::<Result<Vec<_>, ContractError>>()?;

    Ok(OrdersResponse { orders })
}

pub fn query_fee_escrow(deps: Deps, env: Env) -> Result<FeeEscrowResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let escrow = escrow_balance(deps, &env.contract.address, &config)?;
    Ok(FeeEscrowResponse {
        denom: config.fee_denom,
        held: escrow.held,
        balance: escrow.balance,
        withdrawable: escrow.withdrawable,
    })
}

/// Digest a maker must sign for `terms` to be accepted by this deployment
pub fn query_signing_digest(env: Env, terms: OrderTerms) -> SigningDigestResponse {
    let digest = terms.signing_digest(&domain_separator(&env));
    SigningDigestResponse {
        digest: hex::encode(digest),
    }
}
