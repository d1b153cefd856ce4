//! Map spaces: sectors, cities and the two neighbouring countries.
//!
//! ## Kinds
//!
//! [`SpaceKind`] is a closed set. Only countries carry the `independent`
//! flag, and every rule that treats kinds differently matches on it.
//!
//! ## Derived state
//!
//! Piece counts and control are read straight from the embedded [`Forces`];
//! a space caches nothing of its own about them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::forces::{Control, Forces, PieceKind, MAX_INDEPENDENT_COUNTRY_BASES};
use crate::core::{Result, RulesError};

/// Index of a space in board construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpaceId(pub u8);

impl SpaceId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SpaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Terrain flags, combined with `|`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Terrain(u8);

impl Terrain {
    pub const NONE: Terrain = Terrain(0);
    pub const MOUNTAIN: Terrain = Terrain(1);
    pub const COASTAL: Terrain = Terrain(2);
    pub const BORDER: Terrain = Terrain(4);

    /// Whether every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Terrain) -> bool {
        self.0 & other.0 == other.0
    }

    /// Both sets of flags.
    #[must_use]
    pub const fn union(self, other: Terrain) -> Terrain {
        Terrain(self.0 | other.0)
    }
}

impl std::ops::BitOr for Terrain {
    type Output = Terrain;

    fn bitor(self, rhs: Terrain) -> Terrain {
        self.union(rhs)
    }
}

/// Military region I to VI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wilaya(pub u8);

impl std::fmt::Display for Wilaya {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const ROMAN: [&str; 7] = ["?", "I", "II", "III", "IV", "V", "VI"];
        f.write_str(ROMAN.get(self.0 as usize).copied().unwrap_or("?"))
    }
}

/// Political stance of a population.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Support,
    #[default]
    Neutral,
    Oppose,
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::Support => write!(f, "Support"),
            Alignment::Neutral => write!(f, "Neutral"),
            Alignment::Oppose => write!(f, "Oppose"),
        }
    }
}

/// Direction of an alignment shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toward {
    Support,
    Oppose,
}

/// Kind of a space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceKind {
    Sector,
    City,
    Country { independent: bool },
}

/// One space of the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    id: SpaceId,
    name: String,
    kind: SpaceKind,
    wilaya: Option<Wilaya>,
    sector: u8,
    pop: u8,
    terrain: Terrain,
    adjacents: SmallVec<[SpaceId; 8]>,
    alignment: Alignment,
    terror: u32,
    resettled: bool,
    forces: Forces,
}

impl Space {
    /// A rural sector.
    #[must_use]
    pub fn sector(id: SpaceId, name: &str, wilaya: u8, sector: u8, pop: u8, terrain: Terrain) -> Self {
        Self::build(id, name, SpaceKind::Sector, Some(Wilaya(wilaya)), sector, pop, terrain, Forces::territory())
    }

    /// A city.
    #[must_use]
    pub fn city(id: SpaceId, name: &str, wilaya: u8, pop: u8, terrain: Terrain) -> Self {
        Self::build(id, name, SpaceKind::City, Some(Wilaya(wilaya)), 0, pop, terrain, Forces::territory())
    }

    /// A neighbouring country, not yet independent.
    #[must_use]
    pub fn country(id: SpaceId, name: &str) -> Self {
        Self::build(
            id,
            name,
            SpaceKind::Country { independent: false },
            None,
            0,
            1,
            Terrain::MOUNTAIN | Terrain::BORDER | Terrain::COASTAL,
            Forces::country(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        id: SpaceId,
        name: &str,
        kind: SpaceKind,
        wilaya: Option<Wilaya>,
        sector: u8,
        pop: u8,
        terrain: Terrain,
        forces: Forces,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            wilaya,
            sector,
            pop,
            terrain,
            adjacents: SmallVec::new(),
            alignment: Alignment::Neutral,
            terror: 0,
            resettled: false,
            forces,
        }
    }

    #[must_use]
    pub fn id(&self) -> SpaceId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> SpaceKind {
        self.kind
    }

    #[must_use]
    pub fn is_sector(&self) -> bool {
        self.kind == SpaceKind::Sector
    }

    #[must_use]
    pub fn is_city(&self) -> bool {
        self.kind == SpaceKind::City
    }

    #[must_use]
    pub fn is_country(&self) -> bool {
        matches!(self.kind, SpaceKind::Country { .. })
    }

    /// Whether this is a country that has become independent.
    #[must_use]
    pub fn independent(&self) -> bool {
        matches!(self.kind, SpaceKind::Country { independent: true })
    }

    #[must_use]
    pub fn wilaya(&self) -> Option<Wilaya> {
        self.wilaya
    }

    /// Sector number within its Wilaya, 0 for cities and countries.
    #[must_use]
    pub fn sector_number(&self) -> u8 {
        self.sector
    }

    #[must_use]
    pub fn pop(&self) -> u8 {
        self.pop
    }

    #[must_use]
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    #[must_use]
    pub fn mountain(&self) -> bool {
        self.terrain.contains(Terrain::MOUNTAIN)
    }

    #[must_use]
    pub fn coastal(&self) -> bool {
        self.terrain.contains(Terrain::COASTAL)
    }

    #[must_use]
    pub fn border(&self) -> bool {
        self.terrain.contains(Terrain::BORDER)
    }

    #[must_use]
    pub fn adjacents(&self) -> &[SpaceId] {
        &self.adjacents
    }

    #[must_use]
    pub fn is_adjacent(&self, other: SpaceId) -> bool {
        self.adjacents.contains(&other)
    }

    pub(crate) fn set_adjacents(&mut self, adjacents: &[SpaceId]) {
        self.adjacents = SmallVec::from_slice(adjacents);
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[must_use]
    pub fn support(&self) -> bool {
        self.alignment == Alignment::Support
    }

    #[must_use]
    pub fn neutral(&self) -> bool {
        self.alignment == Alignment::Neutral
    }

    #[must_use]
    pub fn oppose(&self) -> bool {
        self.alignment == Alignment::Oppose
    }

    #[must_use]
    pub fn terror(&self) -> u32 {
        self.terror
    }

    #[must_use]
    pub fn resettled(&self) -> bool {
        self.resettled
    }

    #[must_use]
    pub fn forces(&self) -> &Forces {
        &self.forces
    }

    /// Shift alignment one step.
    ///
    /// Support and Oppose are never more than one step from Neutral, so a
    /// shift from Support toward Oppose lands on Neutral.
    pub fn shift(&mut self, toward: Toward) -> Result<Alignment> {
        let next = match (toward, self.alignment) {
            (Toward::Oppose, Alignment::Support) | (Toward::Support, Alignment::Oppose) => Alignment::Neutral,
            (Toward::Oppose, Alignment::Neutral) => Alignment::Oppose,
            (Toward::Support, Alignment::Neutral) => Alignment::Support,
            (_, held) => {
                return Err(RulesError::AlignmentAtExtreme {
                    space: self.name.clone(),
                    alignment: held.to_string(),
                })
            }
        };
        self.alignment = next;
        Ok(next)
    }

    /// Set alignment outright.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Add `delta` terror markers, returning the new count.
    pub fn shift_terror(&mut self, delta: i32) -> Result<u32> {
        let next = self.terror as i64 + delta as i64;
        if next < 0 {
            return Err(RulesError::NegativeTerror {
                space: self.name.clone(),
            });
        }
        self.terror = next as u32;
        Ok(self.terror)
    }

    /// Set the terror marker count outright.
    pub fn set_terror(&mut self, terror: u32) {
        self.terror = terror;
    }

    /// Drive a 1-population sector's population to zero for good.
    pub fn resettle(&mut self) -> Result<()> {
        let reason = if self.is_country() {
            Some("countries cannot be resettled")
        } else if self.pop != 1 {
            Some("population is not 1")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(RulesError::IllegalResettle {
                space: self.name.clone(),
                reason,
            });
        }
        self.pop = 0;
        self.resettled = true;
        Ok(())
    }

    /// Mark a country independent. Independence is permanent and raises
    /// its base capacity.
    pub fn declare_independence(&mut self) -> Result<()> {
        match &mut self.kind {
            SpaceKind::Country { independent } => {
                *independent = true;
                self.forces.set_max_bases(MAX_INDEPENDENT_COUNTRY_BASES);
                Ok(())
            }
            _ => Err(RulesError::NotACountry(self.name.clone())),
        }
    }

    /// Add `delta` pieces of `kind`, returning whether control changed.
    pub fn add(&mut self, kind: PieceKind, delta: i32) -> Result<bool> {
        self.forces.add(kind, delta).map_err(|err| err.located(&self.name))
    }

    /// Flip `num` underground guerrillas active, returning the active count.
    pub fn activate(&mut self, num: u32) -> Result<u32> {
        if num > self.forces.fln_underground() {
            return Err(RulesError::NotEnoughPieces {
                kind: PieceKind::FlnUnderground.to_string(),
                holder: self.name.clone(),
                have: self.forces.fln_underground(),
                need: num,
            });
        }
        self.add(PieceKind::FlnUnderground, -(num as i32))?;
        self.add(PieceKind::FlnActive, num as i32)?;
        Ok(self.forces.fln_active())
    }

    // Delegated piece counts

    #[must_use]
    pub fn count(&self, kind: PieceKind) -> u32 {
        self.forces.count(kind)
    }

    #[must_use]
    pub fn french_troops(&self) -> u32 {
        self.forces.french_troops()
    }

    #[must_use]
    pub fn french_police(&self) -> u32 {
        self.forces.french_police()
    }

    #[must_use]
    pub fn algerian_troops(&self) -> u32 {
        self.forces.algerian_troops()
    }

    #[must_use]
    pub fn algerian_police(&self) -> u32 {
        self.forces.algerian_police()
    }

    #[must_use]
    pub fn gov_bases(&self) -> u32 {
        self.forces.gov_bases()
    }

    #[must_use]
    pub fn fln_underground(&self) -> u32 {
        self.forces.fln_underground()
    }

    #[must_use]
    pub fn fln_active(&self) -> u32 {
        self.forces.fln_active()
    }

    #[must_use]
    pub fn fln_bases(&self) -> u32 {
        self.forces.fln_bases()
    }

    #[must_use]
    pub fn french_cubes(&self) -> u32 {
        self.forces.french_cubes()
    }

    #[must_use]
    pub fn algerian_cubes(&self) -> u32 {
        self.forces.algerian_cubes()
    }

    #[must_use]
    pub fn gov_cubes(&self) -> u32 {
        self.forces.gov_cubes()
    }

    #[must_use]
    pub fn troops(&self) -> u32 {
        self.forces.troops()
    }

    #[must_use]
    pub fn police(&self) -> u32 {
        self.forces.police()
    }

    #[must_use]
    pub fn guerrillas(&self) -> u32 {
        self.forces.guerrillas()
    }

    #[must_use]
    pub fn bases(&self) -> u32 {
        self.forces.bases()
    }

    #[must_use]
    pub fn max_bases(&self) -> u32 {
        self.forces.max_bases()
    }

    #[must_use]
    pub fn gov(&self) -> u32 {
        self.forces.gov()
    }

    #[must_use]
    pub fn fln(&self) -> u32 {
        self.forces.fln()
    }

    #[must_use]
    pub fn control(&self) -> Option<Control> {
        self.forces.control()
    }

    #[must_use]
    pub fn gov_control(&self) -> bool {
        self.forces.gov_control()
    }

    #[must_use]
    pub fn fln_control(&self) -> bool {
        self.forces.fln_control()
    }

    #[must_use]
    pub fn uncontrolled(&self) -> bool {
        self.forces.uncontrolled()
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector() -> Space {
        Space::sector(SpaceId(0), "Barika", 1, 1, 1, Terrain::MOUNTAIN)
    }

    #[test]
    fn test_kinds_are_exclusive() {
        let s = sector();
        assert!(s.is_sector() && !s.is_city() && !s.is_country());

        let c = Space::city(SpaceId(6), "Constantine", 2, 2, Terrain::NONE);
        assert!(c.is_city() && !c.is_sector() && !c.is_country());
        assert_eq!(c.sector_number(), 0);

        let m = Space::country(SpaceId(28), "Morocco");
        assert!(m.is_country() && !m.independent());
        assert_eq!(m.pop(), 1);
        assert!(m.mountain() && m.border() && m.coastal());
        assert_eq!(m.wilaya(), None);
    }

    #[test]
    fn test_shift_toward_oppose() {
        let mut s = sector();
        s.set_alignment(Alignment::Support);
        assert_eq!(s.shift(Toward::Oppose).unwrap(), Alignment::Neutral);
        assert_eq!(s.shift(Toward::Oppose).unwrap(), Alignment::Oppose);
        assert!(s.shift(Toward::Oppose).is_err());
        assert!(s.oppose());
    }

    #[test]
    fn test_shift_toward_support() {
        let mut s = sector();
        s.set_alignment(Alignment::Oppose);
        assert_eq!(s.shift(Toward::Support).unwrap(), Alignment::Neutral);
        assert_eq!(s.shift(Toward::Support).unwrap(), Alignment::Support);
        let err = s.shift(Toward::Support).unwrap_err();
        assert!(matches!(err, RulesError::AlignmentAtExtreme { .. }));
    }

    #[test]
    fn test_terror() {
        let mut s = sector();
        assert!(s.shift_terror(-1).is_err());
        assert_eq!(s.shift_terror(2).unwrap(), 2);
        assert_eq!(s.shift_terror(-1).unwrap(), 1);
        assert!(s.shift_terror(-2).is_err());
        assert_eq!(s.terror(), 1);
    }

    #[test]
    fn test_resettle() {
        let mut s = sector();
        s.resettle().unwrap();
        assert_eq!(s.pop(), 0);
        assert!(s.resettled());
        assert!(s.resettle().is_err());

        let mut pop2 = Space::sector(SpaceId(8), "Philippeville", 2, 2, 2, Terrain::MOUNTAIN);
        assert!(pop2.resettle().is_err());

        let mut country = Space::country(SpaceId(29), "Tunisia");
        assert!(country.resettle().is_err());
    }

    #[test]
    fn test_independence() {
        let mut country = Space::country(SpaceId(29), "Tunisia");
        assert_eq!(country.max_bases(), 2);
        country.declare_independence().unwrap();
        assert!(country.independent());
        assert_eq!(country.max_bases(), 3);

        assert!(sector().declare_independence().is_err());
    }

    #[test]
    fn test_activate() {
        let mut s = sector();
        s.add(PieceKind::FlnActive, 1).unwrap();
        s.add(PieceKind::FlnUnderground, 2).unwrap();
        assert_eq!(s.activate(2).unwrap(), 3);
        assert_eq!(s.fln_underground(), 0);
        assert!(s.activate(1).is_err());
    }

    #[test]
    fn test_add_errors_name_the_space() {
        let mut s = sector();
        let err = s.add(PieceKind::FlnBase, 3).unwrap_err();
        assert!(err.to_string().contains("Barika"));
    }

    #[test]
    fn test_control_delegates() {
        let mut s = sector();
        s.add(PieceKind::FlnUnderground, 1).unwrap();
        assert!(s.fln_control());
        assert_eq!(s.fln(), 1);
        s.add(PieceKind::FrenchPolice, 2).unwrap();
        assert!(s.gov_control());
        assert_eq!(s.control(), Some(Control::Gov));
    }
}
