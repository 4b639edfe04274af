//! Poll store module
//!
//! Holds the SubPolls and their options in memory and applies the two
//! state changes the rest of the server is allowed to make: recording a
//! vote and toggling whether a SubPoll is open.

mod command;
mod models;
mod poll_store;

pub use command::{Command, StoreEvent};
pub use models::{PollOption, SubPoll};
pub use poll_store::{OptionCheck, PollStore};
