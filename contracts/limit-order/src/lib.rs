pub mod admin;
pub mod contract;
pub mod error;
pub mod escrow;
pub mod guard;
pub mod handlers;
pub mod helpers;
pub mod msg;
pub mod queries;
pub mod settlement;
pub mod state;
pub mod validation;

pub use crate::error::{ContractError, ErrorKind};
