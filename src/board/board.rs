//! The board: every space, the off-map pools and the tracks.
//!
//! ## Queries
//!
//! Rules and bot code reach spaces only through [`Board::search`],
//! [`Board::count`], [`Board::has`] and [`Board::total`].
//!
//! ## Mutation
//!
//! Decision code changes the board by building an [`Action`] and handing it
//! to [`Board::apply`], which replays its steps and records every control
//! change they cause on the steps themselves.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::forces::{Available, Casualties, Control, OutOfPlay, PieceKind, PiecePool};
use super::map;
use super::space::{Space, SpaceId, Toward};
use super::track::{Track, TrackKind};
use crate::core::{Result, RulesError, Scenario};
use crate::turn::{Action, Step};

/// Where pieces can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Space(SpaceId),
    Available,
    Casualties,
    OutOfPlay,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Space(id) => write!(f, "space {id}"),
            Location::Available => write!(f, "available"),
            Location::Casualties => write!(f, "casualties"),
            Location::OutOfPlay => write!(f, "out of play"),
        }
    }
}

/// A control flip caused by moving pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlChange {
    pub from: Control,
    pub to: Control,
}

/// Game board.
#[derive(Clone, Debug)]
pub struct Board {
    spaces: Vec<Space>,
    index: FxHashMap<String, SpaceId>,
    available: Available,
    casualties: Casualties,
    out_of_play: OutOfPlay,
    tracks: [Track; 7],
    capabilities: Vec<u8>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty map: no pieces, every track at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(
            map::spaces(),
            Available::default(),
            Casualties::default(),
            OutOfPlay::default(),
            TrackKind::ALL.map(Track::new),
            Vec::new(),
        )
    }

    /// A board set up for `scenario`.
    pub fn load(scenario: Scenario) -> Result<Self> {
        let mut board = Self::new();
        map::setup(&mut board, scenario)?;
        trace!(%scenario, "scenario loaded");
        Ok(board)
    }

    pub(crate) fn from_parts(
        spaces: Vec<Space>,
        available: Available,
        casualties: Casualties,
        out_of_play: OutOfPlay,
        tracks: [Track; 7],
        capabilities: Vec<u8>,
    ) -> Self {
        let index = spaces.iter().map(|s| (s.name().to_string(), s.id())).collect();
        Self {
            spaces,
            index,
            available,
            casualties,
            out_of_play,
            tracks,
            capabilities,
        }
    }

    // =========================================================================
    // Spaces
    // =========================================================================

    /// All spaces in construction order.
    #[must_use]
    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    /// Space by id. Ids come from this board, so they are always in range.
    #[must_use]
    pub fn space(&self, id: SpaceId) -> &Space {
        &self.spaces[id.index()]
    }

    pub fn space_mut(&mut self, id: SpaceId) -> &mut Space {
        &mut self.spaces[id.index()]
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Space> {
        self.index.get(name).map(|id| self.space(*id))
    }

    /// Id of the space called `name`.
    pub fn id_of(&self, name: &str) -> Result<SpaceId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RulesError::UnknownSpace(name.to_string()))
    }

    /// Ids of the spaces matching `pred`, in construction order.
    pub fn search(&self, pred: impl Fn(&Space) -> bool) -> Vec<SpaceId> {
        self.spaces.iter().filter(|s| pred(*s)).map(Space::id).collect()
    }

    /// Number of spaces matching `pred`.
    pub fn count(&self, pred: impl Fn(&Space) -> bool) -> usize {
        self.spaces.iter().filter(|s| pred(*s)).count()
    }

    /// Whether any space matches `pred`.
    pub fn has(&self, pred: impl Fn(&Space) -> bool) -> bool {
        self.spaces.iter().any(pred)
    }

    /// Sum of `value` over every space.
    pub fn total(&self, value: impl Fn(&Space) -> u32) -> u32 {
        self.spaces.iter().map(value).sum()
    }

    #[must_use]
    pub fn resettled_sectors(&self) -> usize {
        self.count(Space::resettled)
    }

    // =========================================================================
    // Pools
    // =========================================================================

    #[must_use]
    pub fn available(&self) -> &Available {
        &self.available
    }

    pub fn available_mut(&mut self) -> &mut Available {
        &mut self.available
    }

    #[must_use]
    pub fn casualties(&self) -> &Casualties {
        &self.casualties
    }

    pub fn casualties_mut(&mut self) -> &mut Casualties {
        &mut self.casualties
    }

    #[must_use]
    pub fn out_of_play(&self) -> &OutOfPlay {
        &self.out_of_play
    }

    pub fn out_of_play_mut(&mut self) -> &mut OutOfPlay {
        &mut self.out_of_play
    }

    /// Pieces of `kind` at `location`.
    #[must_use]
    pub fn count_at(&self, location: Location, kind: PieceKind) -> u32 {
        match location {
            Location::Space(id) => self.space(id).count(kind),
            Location::Available => self.available.count(kind),
            Location::Casualties => self.casualties.count(kind),
            Location::OutOfPlay => self.out_of_play.count(kind),
        }
    }

    fn add_at(&mut self, location: Location, kind: PieceKind, delta: i32) -> Result<Option<ControlChange>> {
        match location {
            Location::Space(id) => {
                let space = self.space_mut(id);
                let before = space.control();
                let changed = space.add(kind, delta)?;
                Ok(match (changed, before, space.control()) {
                    (true, Some(from), Some(to)) => Some(ControlChange { from, to }),
                    _ => None,
                })
            }
            Location::Available => self.available.add(kind, delta).map(|_| None),
            Location::Casualties => self.casualties.add(kind, delta).map(|_| None),
            Location::OutOfPlay => self.out_of_play.add(kind, delta).map(|_| None),
        }
    }

    /// Move `num` pieces of `what` from `src` to `dst`, flipping guerrillas
    /// on arrival when `flip` is set.
    ///
    /// Returns the control changes caused at the source and destination.
    pub fn transfer(
        &mut self,
        num: u32,
        what: PieceKind,
        src: Location,
        dst: Location,
        flip: bool,
    ) -> Result<(Option<ControlChange>, Option<ControlChange>)> {
        if num == 0 {
            return Ok((None, None));
        }
        let arriving = if flip { what.flipped() } else { what };
        let src_change = self.add_at(src, what, -(num as i32))?;
        let dst_change = match self.add_at(dst, arriving, num as i32) {
            Ok(change) => change,
            Err(err) => {
                // put the pieces back so a refused move leaves no trace
                self.add_at(src, what, num as i32)?;
                return Err(err);
            }
        };
        trace!(num, %what, %src, %dst, %arriving, "transfer");
        Ok((src_change, dst_change))
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    fn track_slot(kind: TrackKind) -> usize {
        TrackKind::ALL.iter().position(|k| *k == kind).unwrap_or(0)
    }

    #[must_use]
    pub fn track(&self, kind: TrackKind) -> &Track {
        &self.tracks[Self::track_slot(kind)]
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track; 7] {
        &self.tracks
    }

    /// Shift a track, returning its new value.
    ///
    /// Resource, commitment and margin tracks saturate; the France and
    /// border zone tracks fail when pushed past either end.
    pub fn shift_track(&mut self, kind: TrackKind, delta: i32) -> Result<i32> {
        let value = self.tracks[Self::track_slot(kind)].shift(delta)?;
        trace!(track = %kind, delta, value, "track shifted");
        Ok(value)
    }

    /// Set a track outright.
    pub fn set_track(&mut self, kind: TrackKind, value: i32) -> Result<i32> {
        self.tracks[Self::track_slot(kind)].set(value)
    }

    #[must_use]
    pub fn fln_resources(&self) -> i32 {
        self.track(TrackKind::FlnResources).value()
    }

    #[must_use]
    pub fn gov_resources(&self) -> i32 {
        self.track(TrackKind::GovResources).value()
    }

    #[must_use]
    pub fn commitment(&self) -> i32 {
        self.track(TrackKind::Commitment).value()
    }

    #[must_use]
    pub fn support_commitment(&self) -> i32 {
        self.track(TrackKind::SupportCommitment).value()
    }

    #[must_use]
    pub fn opposition_bases(&self) -> i32 {
        self.track(TrackKind::OppositionBases).value()
    }

    #[must_use]
    pub fn france_track(&self) -> i32 {
        self.track(TrackKind::France).value()
    }

    #[must_use]
    pub fn border_zone_track(&self) -> i32 {
        self.track(TrackKind::BorderZone).value()
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Card numbers of capabilities in effect.
    #[must_use]
    pub fn capabilities(&self) -> &[u8] {
        &self.capabilities
    }

    pub fn add_capability(&mut self, card: u8) {
        if !self.capabilities.contains(&card) {
            self.capabilities.push(card);
        }
    }

    #[must_use]
    pub fn has_capability(&self, card: u8) -> bool {
        self.capabilities.contains(&card)
    }

    // =========================================================================
    // Victory
    // =========================================================================

    /// FLN bases on the map plus population at Oppose.
    #[must_use]
    pub fn compute_opposition_bases(&self) -> i32 {
        let bases = self.total(Space::fln_bases);
        let oppose = self.total(|s| if s.oppose() && !s.is_country() { u32::from(s.pop()) } else { 0 });
        (bases + oppose) as i32
    }

    /// Commitment plus population at Support.
    #[must_use]
    pub fn compute_support_commitment(&self) -> i32 {
        let support = self.total(|s| if s.support() && !s.is_country() { u32::from(s.pop()) } else { 0 });
        self.commitment() + support as i32
    }

    /// Recompute both victory margins into their tracks.
    pub fn compute_victory_points(&mut self) -> Result<()> {
        let opposition = self.compute_opposition_bases();
        let support = self.compute_support_commitment();
        self.set_track(TrackKind::OppositionBases, opposition)?;
        self.set_track(TrackKind::SupportCommitment, support)?;
        Ok(())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Replay `action` against the board, annotate its transfers with the
    /// control changes they caused, then sanitize it.
    ///
    /// Resources are not touched: the caller charges the action cost.
    pub fn apply(&mut self, action: &mut Action) -> Result<()> {
        for step in action.steps_mut() {
            self.apply_step(step)?;
        }
        action.sanitize();
        Ok(())
    }

    fn apply_step(&mut self, step: &mut Step) -> Result<()> {
        match step {
            Step::Pass => {}
            Step::Activate { space, num } => {
                self.space_mut(*space).activate(*num)?;
            }
            Step::Transfer {
                src,
                dst,
                what,
                num,
                flip,
                src_control,
                dst_control,
            } => {
                let (s, d) = self.transfer(*num, *what, *src, *dst, *flip)?;
                *src_control = s;
                *dst_control = d;
            }
            Step::Shift { track, amount } => {
                self.shift_track(*track, *amount)?;
            }
            Step::SetTerror { space, terror } => {
                self.space_mut(*space).set_terror(*terror);
            }
            Step::SetAlignment { space, alignment } => {
                self.space_mut(*space).set_alignment(*alignment);
            }
            Step::Extort { space } => {
                self.space_mut(*space).activate(1)?;
            }
            Step::Agitate { space, terror, shift } => {
                let target = self.space_mut(*space);
                target.shift_terror(-(*terror as i32))?;
                if *shift {
                    target.shift(Toward::Oppose)?;
                }
            }
        }
        Ok(())
    }
}
