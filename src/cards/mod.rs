//! Event cards.
//!
//! ## Key Types
//!
//! - `CardId`: card number
//! - `CardFlags`: single/dual, FLN marks, capabilities, momentum
//! - `Card`: number, title and flags
//! - `Deck`: draws each card once

pub mod definition;
pub mod registry;

pub use definition::{Card, CardFlags, CardId, FIRST_PROPAGANDA};
pub use registry::{all_cards, card, Deck, MAX_CARD};
