//! Non-reentrant lock around every state-mutating entry point.
//!
//! Token and router calls run as messages after `execute` returns, so the lock is held
//! until the last dispatched message has completed: the final message is turned into a
//! sub-message whose success reply releases the lock. If any message fails the whole
//! transaction, lock included, is reverted. This only stops nested reentry from inside
//! one call's message chain; separate top-level calls are ordered by the host and
//! checked against order state.

use cosmwasm_std::{ReplyOn, Response, Storage};

use crate::error::ContractError;
use crate::state::GUARD;

/// Reply id used solely to release the lock
pub const RELEASE_GUARD_REPLY_ID: u64 = 1;

pub fn acquire(storage: &mut dyn Storage) -> Result<(), ContractError> {
    if GUARD.may_load(storage)?.unwrap_or(false) {
        return Err(ContractError::ReentrantCall {});
    }
    GUARD.save(storage, &true)?;
    Ok(())
}

pub fn release(storage: &mut dyn Storage) {
    GUARD.remove(storage);
}

pub fn is_held(storage: &dyn Storage) -> Result<bool, ContractError> {
    Ok(GUARD.may_load(storage)?.unwrap_or(false))
}

/// Keep the lock until `response`'s messages have all run, or release it right away
/// when there is nothing to dispatch.
pub fn hold_until_complete(storage: &mut dyn Storage, mut response: Response) -> Response {
    match response.messages.last_mut() {
        None => release(storage),
        Some(last) if last.reply_on == ReplyOn::Never => {
            last.id = RELEASE_GUARD_REPLY_ID;
            last.reply_on = ReplyOn::Success;
        }
        // The final message already replies; that reply handler releases the lock.
        Some(_) => {}
    }
    response
}
