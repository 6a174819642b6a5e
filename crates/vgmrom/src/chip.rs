//! Shadow register state for the two chips this crate targets.
pub mod state;

pub use state::{PsgState, YmState};
