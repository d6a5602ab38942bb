//! Test host for the limit order contract.
//!
//! Simulates what the chain does around the contract: CW20 token balances and
//! allowances served through the wasm querier, native fee balances through the bank
//! querier, in-order execution of dispatched messages, sub-message replies, a mock AMM
//! router, and all-or-nothing rollback of a transaction when any step fails.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Api, BankMsg, Binary, Coin, ContractResult, CosmosMsg, Env,
    Event, MemoryStorage, Order as SortOrder, OwnedDeps, Reply, ReplyOn, Response, Storage,
    SubMsgResponse, SubMsgResult, SystemError, SystemResult, Uint128, WasmMsg, WasmQuery,
};
use serde::de::DeserializeOwned;

use limit_orders_contract::contract::{execute, instantiate, query, reply};
use limit_orders_contract::msg::{
    ExecuteMsg, FeeEscrowResponse, InstantiateMsg, OrderResponse, OrdersResponse, QueryMsg,
};
use limit_orders_contract::ContractError;
use limit_orders_types::{
    canonical_address, derive_public_key, sign_digest, AllowanceResponse, BalanceResponse,
    DomainSeparator, OrderSide, OrderTerms, RouterExecuteMsg, SignedOrder, TokenExecuteMsg,
    TokenQueryMsg,
};

pub const FEE_DENOM: &str = "uatom";
pub const PLATFORM_FEE: u128 = 100;
pub const EXECUTION_FEE: u128 = 10;
pub const MAKER_KEY: [u8; 32] = [0x11; 32];
pub const STRANGER_KEY: [u8; 32] = [0x22; 32];
pub const INITIAL_TOKENS: u128 = 1_000_000;

pub type MockDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

/// CW20 balances and allowances of every mock token
#[derive(Clone, Default, Debug)]
pub struct TokenLedger {
    balances: HashMap<(String, String), Uint128>,
    allowances: HashMap<(String, String, String), Uint128>,
}

impl TokenLedger {
    pub fn balance(&self, token: &str, holder: &str) -> Uint128 {
        self.balances
            .get(&(token.to_string(), holder.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn allowance(&self, token: &str, owner: &str, spender: &str) -> Uint128 {
        self.allowances
            .get(&(token.to_string(), owner.to_string(), spender.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn mint(&mut self, token: &str, holder: &str, amount: Uint128) {
        let balance = self.balance(token, holder) + amount;
        self.balances
            .insert((token.to_string(), holder.to_string()), balance);
    }

    pub fn set_allowance(&mut self, token: &str, owner: &str, spender: &str, amount: Uint128) {
        self.allowances.insert(
            (token.to_string(), owner.to_string(), spender.to_string()),
            amount,
        );
    }

    fn transfer(&mut self, token: &str, from: &str, to: &str, amount: Uint128) -> Result<(), String> {
        let from_balance = self
            .balance(token, from)
            .checked_sub(amount)
            .map_err(|_| format!("{from} has insufficient {token} balance"))?;
        self.balances
            .insert((token.to_string(), from.to_string()), from_balance);
        self.mint(token, to, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        token: &str,
        spender: &str,
        owner: &str,
        to: &str,
        amount: Uint128,
    ) -> Result<(), String> {
        let remaining = self
            .allowance(token, owner, spender)
            .checked_sub(amount)
            .map_err(|_| format!("{spender} has insufficient {token} allowance from {owner}"))?;
        self.set_allowance(token, owner, spender, remaining);
        self.transfer(token, owner, to, amount)
    }

    fn increase_allowance(&mut self, token: &str, owner: &str, spender: &str, amount: Uint128) {
        let allowance = self.allowance(token, owner, spender) + amount;
        self.set_allowance(token, owner, spender, allowance);
    }
}

/// Why a simulated transaction failed
#[derive(Debug)]
pub enum TxError {
    /// The contract returned an error from `execute` or `reply`
    Contract(ContractError),
    /// A token, router or bank message failed
    Host(String),
}

impl TxError {
    pub fn contract(self) -> ContractError {
        match self {
            TxError::Contract(err) => err,
            TxError::Host(reason) => panic!("expected contract error, got host failure: {reason}"),
        }
    }

    pub fn host(self) -> String {
        match self {
            TxError::Host(reason) => reason,
            TxError::Contract(err) => panic!("expected host failure, got contract error: {err}"),
        }
    }
}

struct Snapshot {
    storage: Vec<(Vec<u8>, Vec<u8>)>,
    ledger: TokenLedger,
    native: HashMap<String, Uint128>,
}

pub struct Suite {
    pub deps: MockDeps,
    pub env: Env,
    pub ledger: Arc<Mutex<TokenLedger>>,
    native: HashMap<String, Uint128>,
    pub controller: Addr,
    pub maker: Addr,
    pub taker: Addr,
    pub other: Addr,
    pub router: Addr,
    pub token_a: Addr,
    pub token_b: Addr,
    /// Current fee schedule, as attached by `fee_funds`
    pub platform_fee: u128,
    pub execution_fee: u128,
    /// What the mock router pays out per swap; `None` makes every swap revert
    pub router_output: Option<Uint128>,
    /// When a message to this token runs, first call back into the contract with the
    /// given sender and message
    pub reentry: Option<(Addr, Addr, ExecuteMsg)>,
}

pub fn address_for_key(api: &MockApi, key: &[u8; 32]) -> Addr {
    let public_key = derive_public_key(key).unwrap();
    let canonical = canonical_address(public_key.as_slice());
    api.addr_humanize(&canonical.to_vec().into()).unwrap()
}

fn install_token_querier(querier: &mut MockQuerier, ledger: Arc<Mutex<TokenLedger>>) {
    querier.update_wasm(move |request| match request {
        WasmQuery::Smart { contract_addr, msg } => {
            let ledger = ledger.lock().unwrap();
            let response = match from_json::<TokenQueryMsg>(msg) {
                Ok(TokenQueryMsg::Balance { address }) => to_json_binary(&BalanceResponse {
                    balance: ledger.balance(contract_addr, &address),
                }),
                Ok(TokenQueryMsg::Allowance { owner, spender }) => {
                    to_json_binary(&AllowanceResponse {
                        allowance: ledger.allowance(contract_addr, &owner, &spender),
                    })
                }
                Err(err) => {
                    return SystemResult::Err(SystemError::InvalidRequest {
                        error: err.to_string(),
                        request: msg.clone(),
                    })
                }
            };
            SystemResult::Ok(ContractResult::Ok(response.unwrap()))
        }
        _ => SystemResult::Err(SystemError::UnsupportedRequest {
            kind: "only smart queries are mocked".to_string(),
        }),
    });
}

impl Suite {
    pub fn new() -> Self {
        Self::with_fees(PLATFORM_FEE, EXECUTION_FEE)
    }

    pub fn with_fees(platform_fee: u128, execution_fee: u128) -> Self {
        let mut deps = mock_dependencies();
        let env = mock_env();
        let ledger = Arc::new(Mutex::new(TokenLedger::default()));
        install_token_querier(&mut deps.querier, ledger.clone());

        let api = &deps.api;
        let controller = api.addr_make("controller");
        let maker = address_for_key(api, &MAKER_KEY);
        let taker = api.addr_make("taker");
        let other = api.addr_make("other");
        let router = api.addr_make("router");
        let token_a = api.addr_make("token_a");
        let token_b = api.addr_make("token_b");

        let mut suite = Suite {
            controller,
            maker,
            taker,
            other,
            router,
            token_a,
            token_b,
            platform_fee,
            execution_fee,
            deps,
            env,
            ledger,
            native: HashMap::new(),
            router_output: None,
            reentry: None,
        };

        instantiate(
            suite.deps.as_mut(),
            suite.env.clone(),
            message_info(&suite.controller, &[]),
            InstantiateMsg {
                controller: None,
                fee_denom: FEE_DENOM.to_string(),
                platform_fee: Uint128::new(platform_fee),
                execution_fee: Uint128::new(execution_fee),
                default_router: Some(suite.router.to_string()),
            },
        )
        .unwrap();

        let contract = suite.contract().to_string();
        {
            let mut ledger = suite.ledger.lock().unwrap();
            for token in [&suite.token_a, &suite.token_b] {
                for holder in [&suite.maker, &suite.taker] {
                    ledger.mint(token.as_str(), holder.as_str(), Uint128::new(INITIAL_TOKENS));
                    ledger.set_allowance(
                        token.as_str(),
                        holder.as_str(),
                        &contract,
                        Uint128::new(INITIAL_TOKENS),
                    );
                }
            }
        }

        suite
    }

    pub fn contract(&self) -> Addr {
        self.env.contract.address.clone()
    }

    pub fn fee_funds(&self) -> Vec<Coin> {
        let total = self.platform_fee + self.execution_fee;
        if total == 0 {
            return vec![];
        }
        vec![Coin::new(total, FEE_DENOM)]
    }

    pub fn advance_seconds(&mut self, seconds: u64) {
        self.env.block.time = self.env.block.time.plus_seconds(seconds);
        self.env.block.height += 1;
    }

    pub fn next_block(&mut self) {
        self.advance_seconds(6);
    }

    pub fn expiry_in(&self, seconds: u64) -> u64 {
        self.env.block.time.seconds() + seconds
    }

    // ── transactions ────────────────────────────────────────────────────────

    /// Run one transaction: execute, then every dispatched message and reply. Any
    /// failure rolls back contract storage, token ledger and native balances.
    pub fn execute(
        &mut self,
        sender: &Addr,
        funds: &[Coin],
        msg: ExecuteMsg,
    ) -> Result<Response, TxError> {
        let snapshot = self.snapshot();
        let result = self.run(sender, funds, msg);
        if result.is_err() {
            self.restore(snapshot);
        }
        result
    }

    fn run(&mut self, sender: &Addr, funds: &[Coin], msg: ExecuteMsg) -> Result<Response, TxError> {
        let contract = self.contract();
        for coin in funds {
            assert_eq!(coin.denom, FEE_DENOM, "only the fee denom is simulated");
            let balance = self.native_balance(&contract) + coin.amount;
            self.set_native(contract.as_str(), balance);
        }

        let response = execute(
            self.deps.as_mut(),
            self.env.clone(),
            message_info(sender, funds),
            msg,
        )
        .map_err(TxError::Contract)?;
        self.dispatch(&response)?;
        Ok(response)
    }

    fn dispatch(&mut self, response: &Response) -> Result<(), TxError> {
        for sub in &response.messages {
            self.dispatch_msg(&sub.msg)?;
            if matches!(sub.reply_on, ReplyOn::Success | ReplyOn::Always) {
                let reply_response = reply(
                    self.deps.as_mut(),
                    self.env.clone(),
                    success_reply(sub.id, sub.payload.clone()),
                )
                .map_err(TxError::Contract)?;
                self.dispatch(&reply_response)?;
            }
        }
        Ok(())
    }

    fn dispatch_msg(&mut self, msg: &CosmosMsg) -> Result<(), TxError> {
        match msg {
            CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
                let contract = self.contract();
                for coin in amount {
                    let from = self
                        .native_balance(&contract)
                        .checked_sub(coin.amount)
                        .map_err(|_| TxError::Host("contract is out of fee funds".to_string()))?;
                    self.set_native(contract.as_str(), from);
                    let to = self.native_balance_of(to_address) + coin.amount;
                    self.set_native(to_address, to);
                }
                Ok(())
            }
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                if *contract_addr == self.router.to_string() {
                    self.run_router(msg)
                } else {
                    self.run_token(contract_addr, msg)
                }
            }
            other => Err(TxError::Host(format!("unsupported message: {other:?}"))),
        }
    }

    fn run_token(&mut self, token: &str, msg: &Binary) -> Result<(), TxError> {
        if let Some((trigger, sender, inner)) = self.reentry.clone() {
            if trigger.as_str() == token {
                execute(
                    self.deps.as_mut(),
                    self.env.clone(),
                    message_info(&sender, &[]),
                    inner,
                )
                .map_err(TxError::Contract)?;
            }
        }

        let contract = self.contract().to_string();
        let parsed: TokenExecuteMsg =
            from_json(msg).map_err(|e| TxError::Host(e.to_string()))?;
        let mut ledger = self.ledger.lock().unwrap();
        match parsed {
            TokenExecuteMsg::Transfer { recipient, amount } => {
                ledger.transfer(token, &contract, &recipient, amount)
            }
            TokenExecuteMsg::TransferFrom {
                owner,
                recipient,
                amount,
            } => ledger.transfer_from(token, &contract, &owner, &recipient, amount),
            TokenExecuteMsg::IncreaseAllowance { spender, amount } => {
                ledger.increase_allowance(token, &contract, &spender, amount);
                Ok(())
            }
        }
        .map_err(TxError::Host)
    }

    fn run_router(&mut self, msg: &Binary) -> Result<(), TxError> {
        let RouterExecuteMsg::SwapExactTokensForTokensSupportingFeeOnTransferTokens {
            amount_in,
            path,
            to,
            deadline,
            ..
        } = from_json(msg).map_err(|e| TxError::Host(e.to_string()))?;

        if deadline < self.env.block.time.seconds() {
            return Err(TxError::Host("router: expired".to_string()));
        }
        let output = self
            .router_output
            .ok_or_else(|| TxError::Host("router: swap reverted".to_string()))?;

        let contract = self.contract().to_string();
        let router = self.router.to_string();
        let mut ledger = self.ledger.lock().unwrap();
        ledger
            .transfer_from(&path[0], &router, &contract, &router, amount_in)
            .map_err(TxError::Host)?;
        ledger.mint(&path[1], &to, output);
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            storage: self
                .deps
                .storage
                .range(None, None, SortOrder::Ascending)
                .collect(),
            ledger: self.ledger.lock().unwrap().clone(),
            native: self.native.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        let keys: Vec<Vec<u8>> = self
            .deps
            .storage
            .range(None, None, SortOrder::Ascending)
            .map(|(k, _)| k)
            .collect();
        for key in keys {
            self.deps.storage.remove(&key);
        }
        for (key, value) in snapshot.storage {
            self.deps.storage.set(&key, &value);
        }

        *self.ledger.lock().unwrap() = snapshot.ledger;

        let touched: Vec<String> = self.native.keys().cloned().collect();
        self.native = snapshot.native;
        for addr in touched {
            let amount = self.native_balance_of(&addr);
            self.deps
                .querier
                .bank
                .update_balance(addr, vec![Coin::new(amount, FEE_DENOM)]);
        }
    }

    // ── balances ────────────────────────────────────────────────────────────

    fn set_native(&mut self, addr: &str, amount: Uint128) {
        self.native.insert(addr.to_string(), amount);
        self.deps
            .querier
            .bank
            .update_balance(addr, vec![Coin::new(amount, FEE_DENOM)]);
    }

    pub fn native_balance(&self, addr: &Addr) -> Uint128 {
        self.native_balance_of(addr.as_str())
    }

    fn native_balance_of(&self, addr: &str) -> Uint128 {
        self.native.get(addr).copied().unwrap_or_default()
    }

    pub fn token_balance(&self, token: &Addr, holder: &Addr) -> u128 {
        self.ledger
            .lock()
            .unwrap()
            .balance(token.as_str(), holder.as_str())
            .u128()
    }

    pub fn set_allowance(&self, token: &Addr, owner: &Addr, spender: &Addr, amount: u128) {
        self.ledger.lock().unwrap().set_allowance(
            token.as_str(),
            owner.as_str(),
            spender.as_str(),
            Uint128::new(amount),
        );
    }

    pub fn mint(&self, token: &Addr, holder: &Addr, amount: u128) {
        self.ledger
            .lock()
            .unwrap()
            .mint(token.as_str(), holder.as_str(), Uint128::new(amount));
    }

    // ── orders ──────────────────────────────────────────────────────────────

    pub fn terms(&self, side: OrderSide, amount_in: u128, amount_out: u128) -> OrderTerms {
        OrderTerms {
            maker: self.maker.to_string(),
            token_in: self.token_a.to_string(),
            token_out: self.token_b.to_string(),
            amount_in: Uint128::new(amount_in),
            amount_out: Uint128::new(amount_out),
            side,
            expiry: self.expiry_in(3600),
        }
    }

    pub fn domain(&self) -> DomainSeparator {
        DomainSeparator::new(&self.env.block.chain_id, self.env.contract.address.as_str())
    }

    pub fn sign(&self, terms: OrderTerms, key: &[u8; 32]) -> SignedOrder {
        let digest = terms.signing_digest(&self.domain());
        SignedOrder {
            terms,
            signature: sign_digest(&digest, key).unwrap().to_binary(),
        }
    }

    pub fn place_signed(&mut self, terms: OrderTerms) -> Result<String, TxError> {
        let order = self.sign(terms, &MAKER_KEY);
        let funds = self.fee_funds();
        let maker = self.maker.clone();
        let response = self.execute(&maker, &funds, ExecuteMsg::PlaceSignedOrder { order })?;
        Ok(attr(&response, "order_id"))
    }

    pub fn place_routed(&mut self, amount_in: u128, amount_out_min: u128) -> Result<String, TxError> {
        let msg = ExecuteMsg::PlaceOrder {
            token_in: self.token_a.to_string(),
            token_out: self.token_b.to_string(),
            amount_in: Uint128::new(amount_in),
            amount_out_min: Uint128::new(amount_out_min),
            expiry: self.expiry_in(3600),
            router: None,
        };
        let funds = self.fee_funds();
        let maker = self.maker.clone();
        let response = self.execute(&maker, &funds, msg)?;
        Ok(attr(&response, "order_id"))
    }

    pub fn fill(&mut self, taker: &Addr, order_id: &str, amount_in: u128) -> Result<Response, TxError> {
        self.execute(
            taker,
            &[],
            ExecuteMsg::ExecuteOrder {
                order_id: order_id.to_string(),
                fill_amount_in: Uint128::new(amount_in),
            },
        )
    }

    pub fn cancel(&mut self, sender: &Addr, order_id: &str) -> Result<Response, TxError> {
        self.execute(
            sender,
            &[],
            ExecuteMsg::CancelOrder {
                order_id: order_id.to_string(),
            },
        )
    }

    // ── queries ─────────────────────────────────────────────────────────────

    pub fn query<T: DeserializeOwned>(&self, msg: QueryMsg) -> T {
        from_json(query(self.deps.as_ref(), self.env.clone(), msg).unwrap()).unwrap()
    }

    pub fn order(&self, order_id: &str) -> OrderResponse {
        self.query(QueryMsg::Order {
            order_id: order_id.to_string(),
        })
    }

    pub fn orders_by_maker(&self, start_after: Option<String>, limit: Option<u32>) -> OrdersResponse {
        self.query(QueryMsg::OrdersByMaker {
            maker: self.maker.to_string(),
            start_after,
            limit,
        })
    }

    pub fn fee_escrow(&self) -> FeeEscrowResponse {
        self.query(QueryMsg::FeeEscrow {})
    }
}

impl Default for Suite {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(deprecated)]
fn success_reply(id: u64, payload: Binary) -> Reply {
    Reply {
        id,
        payload,
        gas_used: 0,
        result: SubMsgResult::Ok(SubMsgResponse {
            events: vec![],
            data: None,
            msg_responses: vec![],
        }),
    }
}

/// Value of the first attribute named `key`, on the response or any of its events
pub fn attr(response: &Response, key: &str) -> String {
    response
        .attributes
        .iter()
        .chain(response.events.iter().flat_map(|e| e.attributes.iter()))
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap_or_else(|| panic!("missing attribute {key}"))
}

pub fn event<'a>(response: &'a Response, ty: &str) -> &'a Event {
    response
        .events
        .iter()
        .find(|e| e.ty == ty)
        .unwrap_or_else(|| panic!("missing event {ty}"))
}

pub fn event_attr(event: &Event, key: &str) -> String {
    event
        .attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap_or_else(|| panic!("missing attribute {key} on {}", event.ty))
}
