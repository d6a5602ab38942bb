use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use limit_orders_types::{FeeSchedule, OrderSide};

#[cw_serde]
pub struct Config {
    /// Sole identity allowed to change fees, withdraw surplus and sweep tokens
    pub controller: Addr,
    /// Native denomination fees are paid and refunded in
    pub fee_denom: String,
    /// Fees snapshotted into every new order
    pub fees: FeeSchedule,
    /// Router used by routed orders that do not name one
    pub default_router: Option<Addr>,
}

/// How an order is authorized and settled. The two strategies never share a code path.
#[cw_serde]
pub enum Settlement {
    /// Signature admission, peer-to-peer partial fills
    Direct { side: OrderSide },
    /// Allowance admission, single full fill through an AMM router
    Routed { router: Addr },
}

impl Settlement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Settlement::Direct { .. } => "direct",
            Settlement::Routed { .. } => "routed",
        }
    }
}

#[cw_serde]
pub enum OrderStatus {
    Open,
    PartiallyFilled,
    Filled,
    Cancelled,
}

impl OrderStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::PartiallyFilled)
    }

    /// Active orders may move forward; terminal orders never change again.
    pub fn can_transition_to(&self, target: &OrderStatus) -> bool {
        match (self, target) {
            (OrderStatus::Open, OrderStatus::PartiallyFilled) => true,
            (OrderStatus::Open, OrderStatus::Filled) => true,
            (OrderStatus::Open, OrderStatus::Cancelled) => true,
            (OrderStatus::PartiallyFilled, OrderStatus::PartiallyFilled) => true,
            (OrderStatus::PartiallyFilled, OrderStatus::Filled) => true,
            (OrderStatus::PartiallyFilled, OrderStatus::Cancelled) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::PartiallyFilled => "partially_filled",
            OrderStatus::Filled => "filled",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[cw_serde]
pub struct Order {
    pub id: String,
    pub maker: Addr,
    pub token_in: Addr,
    pub token_out: Addr,
    /// Original input amount
    pub amount_in: Uint128,
    /// Original output amount; the minimum acceptable output for routed orders
    pub amount_out: Uint128,
    pub remaining_in: Uint128,
    pub remaining_out: Uint128,
    pub filled_in: Uint128,
    pub filled_out: Uint128,
    pub fill_count: u32,
    /// Output measured by balance difference after a routed swap
    pub amount_out_actual: Option<Uint128>,
    pub settlement: Settlement,
    pub expiry: u64,
    pub created_height: u64,
    pub created_at: u64,
    pub fees: FeeSchedule,
    pub status: OrderStatus,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expiry
    }
}

/// Context carried from a routed execution to the reply that measures its output
#[cw_serde]
pub struct PendingSwap {
    pub order_id: String,
    pub taker: Addr,
    pub recipient: Addr,
    pub token_out: Addr,
    pub balance_before: Uint128,
    pub amount_out_min: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_CONTROLLER: Item<Addr> = Item::new("pending_controller");
pub const ORDERS: Map<&str, Order> = Map::new("orders");
pub const MAKER_ORDERS: Map<(&Addr, &str), bool> = Map::new("maker_orders");
/// Sum of execution fees of all active orders
pub const HELD_EXECUTION_FEES: Item<Uint128> = Item::new("held_execution_fees");
pub const GUARD: Item<bool> = Item::new("guard");
pub const PENDING_SWAP: Item<PendingSwap> = Item::new("pending_swap");
