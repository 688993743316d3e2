pub mod action;
mod state;
mod state_store;

pub use self::state::{CopyRequest, Notice, State};
pub use self::state_store::{PlaybackOptions, StateStore};
