use cosmwasm_std::{CheckedMultiplyRatioError, OverflowError, StdError, Uint128};
use limit_orders_types::{FillError, OrderError};
use thiserror::Error;

/// Coarse classification of every failure the contract can return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed fields, expired at creation, zero amounts, wrong funds
    Validation,
    /// Wrong caller, missing allowance, bad or replayed signature
    Authorization,
    /// Inactive or unknown order, duplicate id, insufficient remaining, reentry
    State,
    /// Token, router or native transfer failure
    ExternalCall,
    /// Checked arithmetic refused to wrap
    Arithmetic,
}

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    MultiplyRatio(#[from] CheckedMultiplyRatioError),

    // ── validation ──────────────────────────────────────────────────────────
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    #[error("Invalid fill: {0}")]
    InvalidFill(FillError),

    #[error("Invalid funds: expected {expected}, got {got}")]
    InvalidFunds { expected: String, got: String },

    #[error("Invalid address for {field}: {reason}")]
    InvalidAddress { field: String, reason: String },

    #[error("Fee denom must not be empty")]
    InvalidFeeDenom {},

    #[error("No router given and no default router configured")]
    MissingRouter {},

    #[error("Nothing to transfer: {what}")]
    NothingToTransfer { what: String },

    // ── authorization ───────────────────────────────────────────────────────
    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        required: Uint128,
        available: Uint128,
    },

    #[error("Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    #[error("Signature was not produced by maker {maker}")]
    SignerMismatch { maker: String },

    #[error("Signature already used for order {id}")]
    SignatureReplayed { id: String },

    #[error("No controller handover is pending")]
    NoPendingController {},

    // ── state ───────────────────────────────────────────────────────────────
    #[error("Order not found: {id}")]
    OrderNotFound { id: String },

    #[error("Order already exists: {id}")]
    OrderAlreadyExists { id: String },

    #[error("Order is not active: {id}")]
    OrderInactive { id: String },

    #[error("Order {id} expired at {expiry}")]
    OrderExpired { id: String, expiry: u64 },

    #[error("Order {id} is not settled through the {expected} strategy")]
    WrongSettlement { id: String, expected: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Reentrant call rejected")]
    ReentrantCall {},

    #[error("Insufficient withdrawable balance: requested {requested}, available {available}")]
    InsufficientWithdrawable {
        requested: Uint128,
        available: Uint128,
    },

    // ── external calls ──────────────────────────────────────────────────────
    #[error("Unknown reply id: {id}")]
    UnknownReply { id: u64 },

    #[error("No routed swap is pending")]
    MissingPendingSwap {},

    #[error("Routed swap failed: {reason}")]
    SwapFailed { reason: String },

    #[error("Slippage exceeded: minimum {minimum}, received {received}")]
    SlippageExceeded {
        minimum: Uint128,
        received: Uint128,
    },
}

impl From<FillError> for ContractError {
    fn from(err: FillError) -> Self {
        match err {
            FillError::Overflow(e) => ContractError::Overflow(e),
            FillError::Ratio(e) => ContractError::MultiplyRatio(e),
            other => ContractError::InvalidFill(other),
        }
    }
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Overflow(_) | ContractError::MultiplyRatio(_) => ErrorKind::Arithmetic,

            ContractError::InvalidFill(FillError::ExceedsRemaining { .. }) => ErrorKind::State,

            ContractError::InvalidOrder(_)
            | ContractError::InvalidFill(_)
            | ContractError::InvalidFunds { .. }
            | ContractError::InvalidAddress { .. }
            | ContractError::InvalidFeeDenom {}
            | ContractError::MissingRouter {}
            | ContractError::NothingToTransfer { .. } => ErrorKind::Validation,

            ContractError::Unauthorized {}
            | ContractError::InsufficientAllowance { .. }
            | ContractError::InvalidSignature { .. }
            | ContractError::SignerMismatch { .. }
            | ContractError::SignatureReplayed { .. }
            | ContractError::NoPendingController {} => ErrorKind::Authorization,

            ContractError::OrderNotFound { .. }
            | ContractError::OrderAlreadyExists { .. }
            | ContractError::OrderInactive { .. }
            | ContractError::OrderExpired { .. }
            | ContractError::WrongSettlement { .. }
            | ContractError::InvalidStateTransition { .. }
            | ContractError::ReentrantCall {}
            | ContractError::InsufficientWithdrawable { .. } => ErrorKind::State,

            ContractError::Std(_)
            | ContractError::UnknownReply { .. }
            | ContractError::MissingPendingSwap {}
            | ContractError::SwapFailed { .. }
            | ContractError::SlippageExceeded { .. } => ErrorKind::ExternalCall,
        }
    }
}
