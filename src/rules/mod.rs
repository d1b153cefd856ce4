//! Rules of play.
//!
//! - `fln`: where FLN Operations and Special Activities are legal
//! - `engine`: the Player contract, action choices and eligibility
//!
//! Nothing here mutates the board; decision makers call into these rules
//! and build Actions themselves.

pub mod engine;
pub mod fln;

pub use engine::{check_allowed, conducted_action, eligibility_swap, limited_op_only, possible_actions, ActionChoice, Player};
