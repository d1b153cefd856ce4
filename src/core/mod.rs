//! Core engine types: errors, factions, RNG, configuration and the
//! decision context.
//!
//! Everything but `context` is independent of the map and the rules.
//! `context` bundles the board and the Turn under construction, and is the
//! state every rule and decision maker receives.

pub mod config;
pub mod context;
pub mod error;
pub mod faction;
pub mod rng;

pub use config::{GameOptions, Scenario};
pub use context::{Checkpoint, ContextSnapshot, GameContext};
pub use error::{Result, RulesError};
pub use faction::Faction;
pub use rng::{GameRng, GameRngState};
