//! Wire shapes of the external contracts the engine calls.
//!
//! Tokens speak the CW20 dialect; the router exposes a single exact-input swap that
//! tolerates fee-on-transfer tokens and reports nothing the engine relies on.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use serde::{Deserialize, Serialize};

#[cw_serde]
pub enum TokenExecuteMsg {
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    /// Approve `spender` for an additional `amount`
    IncreaseAllowance { spender: String, amount: Uint128 },
}

#[cw_serde]
pub enum TokenQueryMsg {
    Balance { address: String },
    Allowance { owner: String, spender: String },
}

// Token contracts may return more fields than these, so no deny_unknown_fields here.

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct AllowanceResponse {
    pub allowance: Uint128,
}

#[cw_serde]
pub enum RouterExecuteMsg {
    SwapExactTokensForTokensSupportingFeeOnTransferTokens {
        amount_in: Uint128,
        amount_out_min: Uint128,
        path: Vec<String>,
        to: String,
        deadline: u64,
    },
}
