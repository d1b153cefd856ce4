//! Piece counters and derived control.
//!
//! ## Forces
//!
//! Every map space embeds a [`Forces`]: eight piece counters plus a control
//! value derived from them. Control is recomputed after every change and
//! [`Forces::add`] reports whether it flipped.
//!
//! ## Pools
//!
//! Pieces off the map live in three pools: [`Available`], [`Casualties`] and
//! [`OutOfPlay`]. Each pool only has fields for the pieces it may hold, so
//! there is no `control` and no active guerrilla count to read off a pool.
//! The [`PiecePool`] trait gives the board a uniform way to move pieces in and
//! out of them.

use serde::{Deserialize, Serialize};

use crate::core::{Result, RulesError};

/// Bases allowed in a sector, a city, or a country not yet independent.
pub const MAX_BASES: u32 = 2;

/// Bases allowed in an independent country.
pub const MAX_INDEPENDENT_COUNTRY_BASES: u32 = 3;

/// The eight kinds of playing piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    FrenchTroops,
    FrenchPolice,
    AlgerianTroops,
    AlgerianPolice,
    GovBase,
    FlnUnderground,
    FlnActive,
    FlnBase,
}

impl PieceKind {
    /// All piece kinds.
    pub const ALL: [PieceKind; 8] = [
        PieceKind::FrenchTroops,
        PieceKind::FrenchPolice,
        PieceKind::AlgerianTroops,
        PieceKind::AlgerianPolice,
        PieceKind::GovBase,
        PieceKind::FlnUnderground,
        PieceKind::FlnActive,
        PieceKind::FlnBase,
    ];

    /// Whether this is a base.
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, PieceKind::GovBase | PieceKind::FlnBase)
    }

    /// Whether this piece belongs to the government.
    #[must_use]
    pub const fn is_gov(self) -> bool {
        matches!(
            self,
            PieceKind::FrenchTroops
                | PieceKind::FrenchPolice
                | PieceKind::AlgerianTroops
                | PieceKind::AlgerianPolice
                | PieceKind::GovBase
        )
    }

    /// The other face of a guerrilla; any other piece is returned unchanged.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            PieceKind::FlnUnderground => PieceKind::FlnActive,
            PieceKind::FlnActive => PieceKind::FlnUnderground,
            other => other,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::FrenchTroops => "french troops",
            PieceKind::FrenchPolice => "french police",
            PieceKind::AlgerianTroops => "algerian troops",
            PieceKind::AlgerianPolice => "algerian police",
            PieceKind::GovBase => "gov bases",
            PieceKind::FlnUnderground => "underground guerrillas",
            PieceKind::FlnActive => "active guerrillas",
            PieceKind::FlnBase => "fln bases",
        };
        f.write_str(name)
    }
}

/// Which faction dominates a space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Gov,
    Fln,
    Uncontrolled,
}

impl Control {
    /// Control from each side's strength (pieces plus bases).
    #[must_use]
    pub fn from_strength(gov: u32, fln: u32) -> Self {
        match gov.cmp(&fln) {
            std::cmp::Ordering::Greater => Control::Gov,
            std::cmp::Ordering::Less => Control::Fln,
            std::cmp::Ordering::Equal => Control::Uncontrolled,
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Control::Gov => write!(f, "GOV control"),
            Control::Fln => write!(f, "FLN control"),
            Control::Uncontrolled => write!(f, "uncontrolled"),
        }
    }
}

/// Pieces in one map space.
///
/// Sectors and cities hold every kind of piece and always have a control
/// value. Countries only hold FLN pieces and have no control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forces {
    french_troops: u32,
    french_police: u32,
    algerian_troops: u32,
    algerian_police: u32,
    gov_bases: u32,
    fln_underground: u32,
    fln_active: u32,
    fln_bases: u32,
    max_bases: u32,
    gov_allowed: bool,
    control: Option<Control>,
}

impl Forces {
    /// Empty forces for a sector or a city.
    #[must_use]
    pub fn territory() -> Self {
        Self::empty(true, Some(Control::Uncontrolled))
    }

    /// Empty forces for a neighbouring country.
    #[must_use]
    pub fn country() -> Self {
        Self::empty(false, None)
    }

    fn empty(gov_allowed: bool, control: Option<Control>) -> Self {
        Self {
            french_troops: 0,
            french_police: 0,
            algerian_troops: 0,
            algerian_police: 0,
            gov_bases: 0,
            fln_underground: 0,
            fln_active: 0,
            fln_bases: 0,
            max_bases: MAX_BASES,
            gov_allowed,
            control,
        }
    }

    #[must_use]
    pub fn french_troops(&self) -> u32 {
        self.french_troops
    }

    #[must_use]
    pub fn french_police(&self) -> u32 {
        self.french_police
    }

    #[must_use]
    pub fn algerian_troops(&self) -> u32 {
        self.algerian_troops
    }

    #[must_use]
    pub fn algerian_police(&self) -> u32 {
        self.algerian_police
    }

    #[must_use]
    pub fn gov_bases(&self) -> u32 {
        self.gov_bases
    }

    #[must_use]
    pub fn fln_underground(&self) -> u32 {
        self.fln_underground
    }

    #[must_use]
    pub fn fln_active(&self) -> u32 {
        self.fln_active
    }

    #[must_use]
    pub fn fln_bases(&self) -> u32 {
        self.fln_bases
    }

    #[must_use]
    pub fn troops(&self) -> u32 {
        self.french_troops + self.algerian_troops
    }

    #[must_use]
    pub fn police(&self) -> u32 {
        self.french_police + self.algerian_police
    }

    #[must_use]
    pub fn french_cubes(&self) -> u32 {
        self.french_troops + self.french_police
    }

    #[must_use]
    pub fn algerian_cubes(&self) -> u32 {
        self.algerian_troops + self.algerian_police
    }

    #[must_use]
    pub fn gov_cubes(&self) -> u32 {
        self.french_cubes() + self.algerian_cubes()
    }

    #[must_use]
    pub fn guerrillas(&self) -> u32 {
        self.fln_underground + self.fln_active
    }

    #[must_use]
    pub fn bases(&self) -> u32 {
        self.gov_bases + self.fln_bases
    }

    /// Government strength: cubes plus bases.
    #[must_use]
    pub fn gov(&self) -> u32 {
        self.gov_cubes() + self.gov_bases
    }

    /// FLN strength: guerrillas plus bases.
    #[must_use]
    pub fn fln(&self) -> u32 {
        self.guerrillas() + self.fln_bases
    }

    /// Current control, `None` for spaces that cannot be controlled.
    #[must_use]
    pub fn control(&self) -> Option<Control> {
        self.control
    }

    #[must_use]
    pub fn gov_control(&self) -> bool {
        self.control == Some(Control::Gov)
    }

    #[must_use]
    pub fn fln_control(&self) -> bool {
        self.control == Some(Control::Fln)
    }

    #[must_use]
    pub fn uncontrolled(&self) -> bool {
        self.control == Some(Control::Uncontrolled)
    }

    /// Base capacity of the space.
    #[must_use]
    pub fn max_bases(&self) -> u32 {
        self.max_bases
    }

    pub(crate) fn set_max_bases(&mut self, max: u32) {
        self.max_bases = max;
    }

    /// Whether this space may hold pieces of `kind`.
    #[must_use]
    pub fn allows(&self, kind: PieceKind) -> bool {
        self.gov_allowed || !kind.is_gov()
    }

    /// Number of pieces of `kind`.
    #[must_use]
    pub fn count(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::FrenchTroops => self.french_troops,
            PieceKind::FrenchPolice => self.french_police,
            PieceKind::AlgerianTroops => self.algerian_troops,
            PieceKind::AlgerianPolice => self.algerian_police,
            PieceKind::GovBase => self.gov_bases,
            PieceKind::FlnUnderground => self.fln_underground,
            PieceKind::FlnActive => self.fln_active,
            PieceKind::FlnBase => self.fln_bases,
        }
    }

    fn slot(&mut self, kind: PieceKind) -> &mut u32 {
        match kind {
            PieceKind::FrenchTroops => &mut self.french_troops,
            PieceKind::FrenchPolice => &mut self.french_police,
            PieceKind::AlgerianTroops => &mut self.algerian_troops,
            PieceKind::AlgerianPolice => &mut self.algerian_police,
            PieceKind::GovBase => &mut self.gov_bases,
            PieceKind::FlnUnderground => &mut self.fln_underground,
            PieceKind::FlnActive => &mut self.fln_active,
            PieceKind::FlnBase => &mut self.fln_bases,
        }
    }

    /// Add `delta` pieces of `kind` (negative to remove) and recompute control.
    ///
    /// Returns whether control changed. Fails when the space cannot hold the
    /// kind, when removing more pieces than present, or when adding bases
    /// would exceed [`Forces::max_bases`]. A failed add leaves the forces
    /// untouched.
    pub fn add(&mut self, kind: PieceKind, delta: i32) -> Result<bool> {
        if delta == 0 {
            return Ok(false);
        }
        if !self.allows(kind) {
            return Err(RulesError::PieceNotAllowed {
                kind: kind.to_string(),
                holder: "country".into(),
            });
        }
        if kind.is_base() && delta > 0 && self.bases() + delta.unsigned_abs() > self.max_bases {
            return Err(RulesError::TooManyBases {
                space: "space".into(),
                bases: self.bases(),
                adding: delta.unsigned_abs(),
                max: self.max_bases,
            });
        }
        let have = self.count(kind);
        let next = have as i64 + delta as i64;
        if next < 0 {
            return Err(RulesError::NotEnoughPieces {
                kind: kind.to_string(),
                holder: "space".into(),
                have,
                need: delta.unsigned_abs(),
            });
        }
        *self.slot(kind) = next as u32;
        Ok(self.update_control())
    }

    /// Recompute control from the counters, returning whether it changed.
    pub fn update_control(&mut self) -> bool {
        let Some(previous) = self.control else {
            return false;
        };
        let next = Control::from_strength(self.gov(), self.fln());
        self.control = Some(next);
        next != previous
    }
}

/// An off-map piece pool.
pub trait PiecePool {
    /// Pool name used in messages.
    fn name(&self) -> &'static str;

    /// Counter for `kind`, `None` when the pool cannot hold it.
    fn slot_mut(&mut self, kind: PieceKind) -> Option<&mut u32>;

    /// Number of pieces of `kind`, zero when the pool cannot hold it.
    fn count(&self, kind: PieceKind) -> u32;

    /// The kind a piece becomes when it lands in this pool.
    fn lands_as(&self, kind: PieceKind) -> PieceKind {
        kind
    }

    /// Add `delta` pieces of `kind` (negative to remove).
    fn add(&mut self, kind: PieceKind, delta: i32) -> Result<()> {
        let kind = self.lands_as(kind);
        let name = self.name();
        let Some(slot) = self.slot_mut(kind) else {
            return Err(RulesError::PieceNotAllowed {
                kind: kind.to_string(),
                holder: name.into(),
            });
        };
        let next = *slot as i64 + delta as i64;
        if next < 0 {
            return Err(RulesError::NotEnoughPieces {
                kind: kind.to_string(),
                holder: name.into(),
                have: *slot,
                need: delta.unsigned_abs(),
            });
        }
        *slot = next as u32;
        Ok(())
    }
}

/// Pieces ready to be placed. Guerrillas here are always underground.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Available {
    french_troops: u32,
    french_police: u32,
    algerian_troops: u32,
    algerian_police: u32,
    gov_bases: u32,
    fln_underground: u32,
    fln_bases: u32,
}

impl Available {
    #[must_use]
    pub fn french_troops(&self) -> u32 {
        self.french_troops
    }

    #[must_use]
    pub fn french_police(&self) -> u32 {
        self.french_police
    }

    #[must_use]
    pub fn algerian_troops(&self) -> u32 {
        self.algerian_troops
    }

    #[must_use]
    pub fn algerian_police(&self) -> u32 {
        self.algerian_police
    }

    #[must_use]
    pub fn gov_bases(&self) -> u32 {
        self.gov_bases
    }

    #[must_use]
    pub fn fln_underground(&self) -> u32 {
        self.fln_underground
    }

    #[must_use]
    pub fn fln_bases(&self) -> u32 {
        self.fln_bases
    }
}

impl PiecePool for Available {
    fn name(&self) -> &'static str {
        "available"
    }

    fn lands_as(&self, kind: PieceKind) -> PieceKind {
        match kind {
            PieceKind::FlnActive => PieceKind::FlnUnderground,
            other => other,
        }
    }

    fn slot_mut(&mut self, kind: PieceKind) -> Option<&mut u32> {
        match kind {
            PieceKind::FrenchTroops => Some(&mut self.french_troops),
            PieceKind::FrenchPolice => Some(&mut self.french_police),
            PieceKind::AlgerianTroops => Some(&mut self.algerian_troops),
            PieceKind::AlgerianPolice => Some(&mut self.algerian_police),
            PieceKind::GovBase => Some(&mut self.gov_bases),
            PieceKind::FlnUnderground => Some(&mut self.fln_underground),
            PieceKind::FlnBase => Some(&mut self.fln_bases),
            PieceKind::FlnActive => None,
        }
    }

    fn count(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::FrenchTroops => self.french_troops,
            PieceKind::FrenchPolice => self.french_police,
            PieceKind::AlgerianTroops => self.algerian_troops,
            PieceKind::AlgerianPolice => self.algerian_police,
            PieceKind::GovBase => self.gov_bases,
            PieceKind::FlnUnderground => self.fln_underground,
            PieceKind::FlnBase => self.fln_bases,
            PieceKind::FlnActive => 0,
        }
    }
}

/// Pieces removed in combat. FLN bases are destroyed rather than kept here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Casualties {
    french_troops: u32,
    french_police: u32,
    algerian_troops: u32,
    algerian_police: u32,
    gov_bases: u32,
    fln_underground: u32,
}

impl Casualties {
    #[must_use]
    pub fn french_troops(&self) -> u32 {
        self.french_troops
    }

    #[must_use]
    pub fn french_police(&self) -> u32 {
        self.french_police
    }

    #[must_use]
    pub fn algerian_troops(&self) -> u32 {
        self.algerian_troops
    }

    #[must_use]
    pub fn algerian_police(&self) -> u32 {
        self.algerian_police
    }

    #[must_use]
    pub fn gov_bases(&self) -> u32 {
        self.gov_bases
    }

    #[must_use]
    pub fn fln_underground(&self) -> u32 {
        self.fln_underground
    }
}

impl PiecePool for Casualties {
    fn name(&self) -> &'static str {
        "casualties"
    }

    fn slot_mut(&mut self, kind: PieceKind) -> Option<&mut u32> {
        match kind {
            PieceKind::FrenchTroops => Some(&mut self.french_troops),
            PieceKind::FrenchPolice => Some(&mut self.french_police),
            PieceKind::AlgerianTroops => Some(&mut self.algerian_troops),
            PieceKind::AlgerianPolice => Some(&mut self.algerian_police),
            PieceKind::GovBase => Some(&mut self.gov_bases),
            PieceKind::FlnUnderground => Some(&mut self.fln_underground),
            PieceKind::FlnActive | PieceKind::FlnBase => None,
        }
    }

    fn count(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::FrenchTroops => self.french_troops,
            PieceKind::FrenchPolice => self.french_police,
            PieceKind::AlgerianTroops => self.algerian_troops,
            PieceKind::AlgerianPolice => self.algerian_police,
            PieceKind::GovBase => self.gov_bases,
            PieceKind::FlnUnderground => self.fln_underground,
            PieceKind::FlnActive | PieceKind::FlnBase => 0,
        }
    }
}

/// Pieces set aside by scenario or events. Never holds Algerian cubes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfPlay {
    french_troops: u32,
    french_police: u32,
    gov_bases: u32,
    fln_underground: u32,
}

impl OutOfPlay {
    #[must_use]
    pub fn french_troops(&self) -> u32 {
        self.french_troops
    }

    #[must_use]
    pub fn french_police(&self) -> u32 {
        self.french_police
    }

    #[must_use]
    pub fn gov_bases(&self) -> u32 {
        self.gov_bases
    }

    #[must_use]
    pub fn fln_underground(&self) -> u32 {
        self.fln_underground
    }
}

impl PiecePool for OutOfPlay {
    fn name(&self) -> &'static str {
        "out of play"
    }

    fn slot_mut(&mut self, kind: PieceKind) -> Option<&mut u32> {
        match kind {
            PieceKind::FrenchTroops => Some(&mut self.french_troops),
            PieceKind::FrenchPolice => Some(&mut self.french_police),
            PieceKind::GovBase => Some(&mut self.gov_bases),
            PieceKind::FlnUnderground => Some(&mut self.fln_underground),
            _ => None,
        }
    }

    fn count(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::FrenchTroops => self.french_troops,
            PieceKind::FrenchPolice => self.french_police,
            PieceKind::GovBase => self.gov_bases,
            PieceKind::FlnUnderground => self.fln_underground,
            _ => 0,
        }
    }
}
