//! Map, pieces and tracks.
//!
//! - `forces`: piece counters, control, off-map pools
//! - `space`: sectors, cities, countries
//! - `track`: clamped and hard-bounded counters
//! - `board`: the aggregate, its queries and the action replay
//! - `map`: static map feed and scenario setups
//! - `snapshot`: serializable board state

#[allow(clippy::module_inception)]
pub mod board;
pub mod forces;
mod map;
pub mod snapshot;
pub mod space;
pub mod track;

pub use board::{Board, ControlChange, Location};
pub use forces::{
    Available, Casualties, Control, Forces, OutOfPlay, PieceKind, PiecePool, MAX_BASES,
    MAX_INDEPENDENT_COUNTRY_BASES,
};
pub use snapshot::BoardSnapshot;
pub use space::{Alignment, Space, SpaceId, SpaceKind, Terrain, Toward, Wilaya};
pub use track::{Bound, Track, TrackKind};
