//! Turn bookkeeping.
//!
//! - `action`: one selected space and the primitive steps executed there
//! - `ledger`: the per half-round selection state machine

pub mod action;
pub mod ledger;

pub use action::{Action, ActionKind, Operation, SpecialActivity, Step, Target};
pub use ledger::Turn;
