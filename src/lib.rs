//! # colonial-twilight
//!
//! Rules engine and FLN bot for the Colonial Twilight counter-insurgency
//! wargame.
//!
//! ## Design Principles
//!
//! 1. **Fail Fast**: Illegal states are programmer errors. Every mutation
//!    returns a `Result` and nothing is silently corrected, except the
//!    clamped tracks which saturate by rule.
//!
//! 2. **Explicit Context**: Decision code receives a `GameContext` holding
//!    the board, the single RNG, the Turn under construction and the
//!    options. There is no global game state.
//!
//! 3. **Replayable Turns**: A half-round is a ledger of Actions made of
//!    closed `Step`s. The board only changes by replaying them.
//!
//! ## Architecture
//!
//! - **Persistent Turn Ledger**: Actions live in an `im::Vector`, so a
//!   checkpoint of the turn is a cheap clone and a failed bot attempt rolls
//!   back by restoring it.
//!
//! - **Deterministic Bot**: Dice and tie-breaks come from one seeded ChaCha8
//!   stream. Same seed, same board, same decisions.
//!
//! ## Modules
//!
//! - `core`: errors, RNG, options, factions, the decision context
//! - `board`: pieces, spaces, tracks, the board and the short scenario
//! - `turn`: Actions and the Turn ledger
//! - `rules`: FLN legality predicates, player choices and eligibility
//! - `cards`: the 71-card deck and its attributes
//! - `bot`: the FLN bot
//! - `game`: card-by-card driver

pub mod board;
pub mod bot;
pub mod cards;
pub mod core;
pub mod game;
pub mod rules;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{Faction, GameContext, GameOptions, GameRng, GameRngState, Result, RulesError, Scenario};

pub use crate::board::{
    Alignment, Board, BoardSnapshot, Control, Location, PieceKind, Space, SpaceId, SpaceKind, TrackKind,
};

pub use crate::turn::{Action, ActionKind, Operation, SpecialActivity, Step, Target, Turn};

pub use crate::rules::{possible_actions, ActionChoice, Player};

pub use crate::cards::{Card, CardId, Deck};

pub use crate::bot::{FlnBot, FlnBotRules};

pub use crate::game::{Game, GovStub};
