//! Voting policy applied by the server before a command reaches the store.
//!
//! The store records votes regardless of `isOpen`; whether a closed SubPoll
//! refuses votes is decided here.

use tracing::warn;

use crate::config::PollsConfig;
use crate::error::AppError;
use crate::store::{Command, PollStore, StoreEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotePolicy {
    pub reject_closed_votes: bool,
}

impl Default for VotePolicy {
    fn default() -> Self {
        Self {
            reject_closed_votes: true,
        }
    }
}

impl From<&PollsConfig> for VotePolicy {
    fn from(config: &PollsConfig) -> Self {
        Self {
            reject_closed_votes: config.reject_closed_votes,
        }
    }
}

impl VotePolicy {
    pub fn check(&self, store: &PollStore, command: &Command) -> Result<(), AppError> {
        match command {
            Command::Vote { subpoll_id, .. } => {
                let subpoll = store.subpoll(subpoll_id)?;
                if self.reject_closed_votes && !subpoll.is_open() {
                    warn!("Rejected vote on closed subpoll {}", subpoll_id);
                    return Err(AppError::PollClosed(subpoll_id.clone()));
                }
                Ok(())
            }
            Command::ToggleOpen { .. } => Ok(()),
        }
    }

    /// Checks `command` and applies it if allowed. The caller holds the
    /// store exclusively for both steps.
    pub fn apply(&self, store: &mut PollStore, command: &Command) -> Result<StoreEvent, AppError> {
        self.check(store, command)?;
        Ok(store.apply(command)?)
    }
}
