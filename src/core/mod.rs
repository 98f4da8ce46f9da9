//! Core state types shared by signals and the controller.
//!
//! - State definitions via the `State` trait
//! - Immutable history tracking
//!
//! Nothing in this module performs I/O.

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::State;
