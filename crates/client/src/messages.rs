//! Execute messages for the limit order contract

use cosmwasm_std::{to_json_binary, Binary, Coin, Uint128};
use limit_orders_contract::msg::ExecuteMsg;
use limit_orders_types::{SignedOrder, TokenExecuteMsg};

use crate::{ClientConfig, Result};

/// A contract message with the funds it must carry
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub contract: String,
    pub msg: Binary,
    pub funds: Vec<Coin>,
}

/// Builds messages for one deployment
pub struct MessageBuilder<'a> {
    config: &'a ClientConfig,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    /// Fee coins every placement must attach; empty when fees are zero
    pub fn fee_funds(&self) -> Vec<Coin> {
        let total = self.config.orders.total_fee();
        if total == 0 {
            return vec![];
        }
        vec![Coin::new(total, self.config.network.fee_denom.clone())]
    }

    /// Allow the contract to pull `amount` of `token` from the sender
    pub fn approve(&self, token: &str, amount: u128) -> Result<OutgoingMessage> {
        let msg = TokenExecuteMsg::IncreaseAllowance {
            spender: self.config.network.contract_address.clone(),
            amount: Uint128::new(amount),
        };
        Ok(OutgoingMessage {
            contract: token.to_string(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        })
    }

    /// Routed order; expiry is `now` plus the configured lifetime
    pub fn place_order(
        &self,
        token_in: &str,
        token_out: &str,
        amount_in: u128,
        amount_out_min: u128,
        now: u64,
    ) -> Result<OutgoingMessage> {
        self.contract_msg(
            &ExecuteMsg::PlaceOrder {
                token_in: token_in.to_string(),
                token_out: token_out.to_string(),
                amount_in: Uint128::new(amount_in),
                amount_out_min: Uint128::new(amount_out_min),
                expiry: self.expiry(now),
                router: self.config.orders.router.clone(),
            },
            self.fee_funds(),
        )
    }

    pub fn place_signed_order(&self, order: SignedOrder) -> Result<OutgoingMessage> {
        self.contract_msg(&ExecuteMsg::PlaceSignedOrder { order }, self.fee_funds())
    }

    pub fn cancel_order(&self, order_id: &str) -> Result<OutgoingMessage> {
        self.contract_msg(
            &ExecuteMsg::CancelOrder {
                order_id: order_id.to_string(),
            },
            vec![],
        )
    }

    pub fn execute_order(&self, order_id: &str, fill_amount_in: u128) -> Result<OutgoingMessage> {
        self.contract_msg(
            &ExecuteMsg::ExecuteOrder {
                order_id: order_id.to_string(),
                fill_amount_in: Uint128::new(fill_amount_in),
            },
            vec![],
        )
    }

    pub fn execute_routed_order(&self, order_id: &str) -> Result<OutgoingMessage> {
        self.contract_msg(
            &ExecuteMsg::ExecuteRoutedOrder {
                order_id: order_id.to_string(),
            },
            vec![],
        )
    }

    /// Expiry for an order created at `now`
    pub fn expiry(&self, now: u64) -> u64 {
        now.saturating_add(self.config.orders.expiry_secs)
    }

    fn contract_msg(&self, msg: &ExecuteMsg, funds: Vec<Coin>) -> Result<OutgoingMessage> {
        Ok(OutgoingMessage {
            contract: self.config.network.contract_address.clone(),
            msg: to_json_binary(msg)?,
            funds,
        })
    }
}
