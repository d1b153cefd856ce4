//! The two factions.

use serde::{Deserialize, Serialize};

/// A side in the war.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// French and Algerian government forces.
    Gov,
    /// Front de Libération Nationale.
    Fln,
}

impl Faction {
    /// The other faction.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Faction::Gov => Faction::Fln,
            Faction::Fln => Faction::Gov,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Gov => write!(f, "GOV"),
            Faction::Fln => write!(f, "FLN"),
        }
    }
}
