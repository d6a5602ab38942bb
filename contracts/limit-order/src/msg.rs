use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use limit_orders_types::{OrderSide, OrderTerms, SignedOrder};

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating address
    pub controller: Option<String>,
    pub fee_denom: String,
    pub platform_fee: Uint128,
    pub execution_fee: Uint128,
    pub default_router: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Place an order settled through an AMM router.
    /// The sender must already have approved this contract for `amount_in` of `token_in`
    /// and must attach exactly the current platform + execution fee.
    PlaceOrder {
        token_in: String,
        token_out: String,
        amount_in: Uint128,
        amount_out_min: Uint128,
        expiry: u64,
        router: Option<String>,
    },

    /// Place a maker-signed order settled directly against takers.
    /// Anyone may submit it; sell orders pull `amount_in` from the maker into escrow.
    PlaceSignedOrder { order: SignedOrder },

    /// Cancel an active order (maker only)
    CancelOrder { order_id: String },

    /// Fill part or all of a direct order
    ExecuteOrder {
        order_id: String,
        fill_amount_in: Uint128,
    },

    /// Settle a routed order in full through its router
    ExecuteRoutedOrder { order_id: String },

    /// Change fees charged to orders placed from now on (controller only)
    UpdateFees {
        platform_fee: Uint128,
        execution_fee: Uint128,
    },

    /// Change or clear the default router (controller only)
    UpdateDefaultRouter { router: Option<String> },

    /// Withdraw fee surplus not held for active orders (controller only)
    WithdrawFees {
        amount: Option<Uint128>,
        recipient: Option<String>,
    },

    /// Transfer this contract's entire balance of a token out (controller only)
    SweepToken {
        token: String,
        recipient: Option<String>,
    },

    /// Offer the controller role to another address (controller only)
    ProposeController { controller: String },

    /// Accept a pending controller offer
    AcceptController {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(OrderResponse)]
    Order { order_id: String },

    #[returns(OrdersResponse)]
    OrdersByMaker {
        maker: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(FeeEscrowResponse)]
    FeeEscrow {},

    #[returns(SigningDigestResponse)]
    SigningDigest { terms: OrderTerms },
}

#[cw_serde]
pub struct ConfigResponse {
    pub controller: String,
    pub pending_controller: Option<String>,
    pub fee_denom: String,
    pub platform_fee: Uint128,
    pub execution_fee: Uint128,
    pub default_router: Option<String>,
}

#[cw_serde]
pub struct OrderResponse {
    pub id: String,
    pub maker: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: Uint128,
    pub amount_out: Uint128,
    pub remaining_in: Uint128,
    pub remaining_out: Uint128,
    pub filled_in: Uint128,
    pub filled_out: Uint128,
    pub fill_count: u32,
    pub amount_out_actual: Option<Uint128>,
    pub strategy: String,
    pub side: Option<OrderSide>,
    pub router: Option<String>,
    pub expiry: u64,
    pub created_height: u64,
    pub created_at: u64,
    pub platform_fee: Uint128,
    pub execution_fee: Uint128,
    pub status: String,
    pub active: bool,
}

#[cw_serde]
pub struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

#[cw_serde]
pub struct FeeEscrowResponse {
    pub denom: String,
    /// Execution fees held for active orders
    pub held: Uint128,
    /// Native balance of the contract
    pub balance: Uint128,
    /// `balance - held`
    pub withdrawable: Uint128,
}

#[cw_serde]
pub struct SigningDigestResponse {
    /// Hex digest the maker signs; also the id the order will be stored under
    pub digest: String,
}
