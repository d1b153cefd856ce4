//! Decision making for the bot factions.
//!
//! ## Key Types
//!
//! - `FlnBotRules`: the FLN flowchart's predicates and priorities
//! - `FlnBot`: plays an FLN half-round
//! - `Losses`: pieces a removal takes, by kind

pub mod fln;
pub mod priorities;

pub use fln::FlnBot;
pub use priorities::{FlnBotRules, Losses};
