//! Card-by-card game driver.
//!
//! Each card gives the first eligible faction a half-round, then the second
//! one with whatever the first left open. Victory aggregates are recomputed
//! after every half-round and the factions swap places when the first one
//! took an Operation with a Special Activity or a Limited Operation.

mod driver;

pub use driver::{Game, GovStub, HalfRound};
