//! FLN bot heuristics.
//!
//! [`FlnBotRules`] turns the bot flowchart into predicates and priority
//! filters. Implementors only provide the board, the RNG and the
//! eligibility facts of the current half-round; everything else is a
//! provided method, so tests can drive the heuristics from a plain struct.
//!
//! ## Filters
//!
//! Priority filters narrow a candidate list one criterion at a time. A
//! filter that would leave nothing is skipped ([`try_filter`]). Remaining
//! ties are broken with the RNG.

use smallvec::SmallVec;

use crate::board::{Board, PieceKind, Space, SpaceId, Wilaya};
use crate::core::GameRng;
use crate::rules::fln::{max_placable_guerrillas, may_agitate_in, may_rally_in};

// =============================================================================
// Filters
// =============================================================================

/// Keep the spaces of `list` matching `pred`, or all of them if none does.
pub fn try_filter(board: &Board, list: &[SpaceId], pred: impl Fn(&Space) -> bool) -> Vec<SpaceId> {
    let filtered: Vec<SpaceId> = list.iter().copied().filter(|id| pred(board.space(*id))).collect();
    if filtered.is_empty() {
        list.to_vec()
    } else {
        filtered
    }
}

/// Keep the spaces of `list` sharing the highest `key`.
///
/// Wrap the key in `std::cmp::Reverse` to keep the lowest instead.
pub fn best_by<K: Ord>(board: &Board, list: &[SpaceId], key: impl Fn(&Space) -> K) -> Vec<SpaceId> {
    let Some(best) = list.iter().map(|id| key(board.space(*id))).max() else {
        return Vec::new();
    };
    list.iter().copied().filter(|id| key(board.space(*id)) == best).collect()
}

// =============================================================================
// Piece accounting
// =============================================================================

/// Pieces taken out of a space, by kind, in removal order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Losses(SmallVec<[(PieceKind, u32); 5]>);

impl Losses {
    fn push(&mut self, kind: PieceKind, num: u32) {
        if num > 0 {
            self.0.push((kind, num));
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|(_, n)| n).sum()
    }

    #[must_use]
    pub fn count(&self, kind: PieceKind) -> u32 {
        self.0.iter().filter(|(k, _)| *k == kind).map(|(_, n)| n).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u32)> + '_ {
        self.0.iter().copied()
    }

    /// French pieces and bases: the losses that cost the government
    /// commitment.
    #[must_use]
    pub fn french(&self) -> u32 {
        self.count(PieceKind::FrenchPolice) + self.count(PieceKind::FrenchTroops) + self.count(PieceKind::GovBase)
    }
}

/// Up to `max` government pieces an attack on `space` removes.
///
/// Police before troops, French before Algerian; bases only once no cube
/// is left.
#[must_use]
pub fn plan_casualties(space: &Space, max: u32) -> Losses {
    let mut losses = Losses::default();
    let mut left = max;
    for kind in [
        PieceKind::FrenchPolice,
        PieceKind::AlgerianPolice,
        PieceKind::FrenchTroops,
        PieceKind::AlgerianTroops,
    ] {
        let n = space.count(kind).min(left);
        losses.push(kind, n);
        left -= n;
    }
    if space.gov_cubes() <= max - left {
        losses.push(PieceKind::GovBase, space.gov_bases().min(left));
    }
    losses
}

/// Up to `num` FLN pieces to take out of `space`: active guerrillas, then
/// underground ones, then bases.
#[must_use]
pub fn remove_from(space: &Space, num: u32) -> Losses {
    let mut losses = Losses::default();
    let mut left = num;
    for kind in [PieceKind::FlnActive, PieceKind::FlnUnderground, PieceKind::FlnBase] {
        let n = space.count(kind).min(left);
        losses.push(kind, n);
        left -= n;
    }
    losses
}

/// Active guerrillas that may leave `space` to be placed elsewhere.
///
/// Two guerrillas always stay at a base or at Support.
#[must_use]
pub fn spare_guerrillas(space: &Space) -> u32 {
    if space.fln_bases() > 0 || space.support() {
        space.fln_active().min(space.guerrillas().saturating_sub(2))
    } else {
        space.fln_active()
    }
}

/// Whether the government could pacify `space`.
#[must_use]
pub fn pacifiable(space: &Space) -> bool {
    !space.is_country()
        && (space.gov_bases() > 0 || (space.troops() >= 1 && space.police() >= 1 && space.gov_control()))
}

/// Wilayas holding a city.
const CITY_WILAYAS: [Wilaya; 3] = [Wilaya(2), Wilaya(4), Wilaya(5)];

// =============================================================================
// Bot rules
// =============================================================================

/// The FLN flowchart as predicates over the current board.
pub trait FlnBotRules {
    fn board(&self) -> &Board;

    fn rng(&mut self) -> &mut GameRng;

    /// Only a single-space Operation is on offer.
    fn limited_op_only(&self) -> bool;

    fn first_eligible(&self) -> bool;

    /// Whether the government acts first on the next card.
    fn will_be_next_first_eligible(&self) -> bool;

    fn d6(&mut self) -> u8 {
        self.rng().d6()
    }

    // -------------------------------------------------------------------------
    // Flowchart
    // -------------------------------------------------------------------------

    /// Broke, with only a limited Operation left.
    fn pass_required(&self) -> bool {
        self.board().fln_resources() == 0 && self.limited_op_only()
    }

    /// Every FLN base keeps enough underground guerrillas.
    fn terror_1(&self) -> bool {
        !self.board().has(|s| {
            s.fln_bases() > 0
                && if s.pop() == 0 {
                    s.fln_underground() == 0
                } else {
                    s.fln_underground() < 2
                }
        })
    }

    /// The government is first eligible and keeps the initiative.
    fn terror_2(&self) -> bool {
        !self.first_eligible() && self.will_be_next_first_eligible()
    }

    /// The card in play is the last before the final Propaganda round.
    ///
    /// The deck does not track campaigns yet, so this never holds and
    /// Terror never reaches into Neutral spaces.
    fn last_campaign(&self) -> bool {
        false
    }

    /// Rally would place a base.
    fn rally_1(&self) -> bool {
        self.board().available().fln_bases() > 0
            && self
                .board()
                .has(|s| self.may_add_base_in(s) && (self.rally_2_in(s) || self.rally_1_in(s)))
    }

    /// Bases are short of guerrillas: twice the bases outnumber the
    /// guerrillas at bases plus half a die.
    fn rally_2(&mut self) -> bool {
        let bases = self.board().total(Space::fln_bases) * 2;
        let at_bases = self
            .board()
            .total(|s| if s.fln_bases() > 0 { s.guerrillas() } else { 0 });
        let roll = u32::from(self.d6()) / 2;
        bases > at_bases + roll
    }

    // -------------------------------------------------------------------------
    // Rally
    // -------------------------------------------------------------------------

    /// Room for one more FLN base and guerrillas to build it from.
    ///
    /// One FLN base per space in Algeria.
    fn may_add_base_in(&self, space: &Space) -> bool {
        let cap = if space.is_country() { space.max_bases() } else { 1 };
        space.guerrillas() > 2 && space.fln_bases() < cap && space.bases() < space.max_bases() && may_rally_in(space)
    }

    fn rally_1_in(&self, space: &Space) -> bool {
        space.guerrillas() >= 3 && (self.limited_op_only() || space.gov_cubes() == 0)
    }

    fn rally_2_in(&self, space: &Space) -> bool {
        space.guerrillas() >= 4
    }

    /// FLN base short of underground guerrillas.
    fn rally_3_in(&self, space: &Space) -> bool {
        space.fln_bases() > 0
            && if space.is_country() || space.pop() == 0 {
                space.fln_underground() == 0
            } else {
                space.fln_underground() < 2
            }
    }

    /// Algeria, then government cubes, then population; least underground,
    /// most active.
    fn rally_3_priority(&mut self, list: &[SpaceId]) -> Option<SpaceId> {
        let board = self.board();
        let l = try_filter(board, list, |s| !s.is_country());
        let l = try_filter(board, &l, |s| s.gov_cubes() > 0);
        let l = try_filter(board, &l, |s| s.pop() > 0);
        let l = best_by(board, &l, |s| std::cmp::Reverse(s.fln_underground()));
        let l = best_by(board, &l, Space::fln_active);
        self.rng().choose(&l).copied()
    }

    fn rally_5_in(&self, space: &Space) -> bool {
        !space.is_city() && space.support() && space.fln_underground() == 0
    }

    fn rally_5_priority(&self, list: &[SpaceId]) -> Vec<SpaceId> {
        best_by(self.board(), list, Space::pop)
    }

    fn rally_6_in(&self, space: &Space) -> bool {
        space.pop() > 1 && may_agitate_in(space)
    }

    /// Where placing would gain FLN control, then remove government
    /// control, then Wilayas with a city, then least terror.
    fn rally_7_priority(&self, list: &[SpaceId], to_place: u32) -> Vec<SpaceId> {
        let board = self.board();
        let reach = |s: &Space| s.fln() + max_placable_guerrillas(s).min(to_place);
        let l = try_filter(board, list, |s| s.uncontrolled() && reach(s) > s.gov());
        let l = try_filter(board, &l, |s| s.gov_control() && reach(s) >= s.gov());
        let l = try_filter(board, &l, |s| s.wilaya().map_or(false, |w| CITY_WILAYAS.contains(&w)));
        best_by(board, &l, |s| std::cmp::Reverse(s.terror()))
    }

    fn rally_8_in(&self, space: &Space) -> bool {
        space.guerrillas() > 0 && space.fln_bases() == 0
    }

    /// Algeria, most FLN, no government cubes.
    fn rally_8_priority(&self, list: &[SpaceId]) -> Vec<SpaceId> {
        let board = self.board();
        let l = try_filter(board, list, |s| !s.is_country());
        let l = best_by(board, &l, Space::fln);
        try_filter(board, &l, |s| s.gov_cubes() == 0)
    }

    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    /// Guerrillas that could be placed in `dst`: available ones plus those
    /// other spaces can spare.
    fn fln_to_place(&self, dst: Option<SpaceId>) -> u32 {
        let board = self.board();
        let spare: u32 = board
            .spaces()
            .iter()
            .filter(|s| Some(s.id()) != dst)
            .map(spare_guerrillas)
            .sum();
        board.available().fln_underground() + spare
    }

    /// Support, then spaces with guerrillas, then at random.
    fn place_in(&mut self, list: &[SpaceId]) -> Option<SpaceId> {
        let board = self.board();
        let l = try_filter(board, list, Space::support);
        let l = try_filter(board, &l, |s| s.guerrillas() > 0);
        self.rng().choose(&l).copied()
    }

    /// Space giving up active guerrillas, most guerrillas first.
    fn place_from(&mut self, exclude: &[SpaceId]) -> Option<SpaceId> {
        let board = self.board();
        let l: Vec<SpaceId> = board
            .search(|s| spare_guerrillas(s) > 0)
            .into_iter()
            .filter(|id| !exclude.contains(id))
            .collect();
        let l = best_by(board, &l, Space::guerrillas);
        self.rng().choose(&l).copied()
    }

    // -------------------------------------------------------------------------
    // Attack
    // -------------------------------------------------------------------------

    /// Planned removals per space, most government bases first, then French
    /// troops, French police and total.
    ///
    /// Spaces with more than 5 guerrillas remove 2 pieces, the others 1.
    fn attack_priority(&mut self, list: &[SpaceId]) -> Vec<(SpaceId, Losses)> {
        let board = self.board();
        let mut plans: Vec<(SpaceId, Losses)> = list
            .iter()
            .map(|id| {
                let space = board.space(*id);
                let max = if space.guerrillas() > 5 { 2 } else { 1 };
                (*id, plan_casualties(space, max))
            })
            .collect();
        self.rng().shuffle(&mut plans);
        plans.sort_by_key(|(_, l)| {
            std::cmp::Reverse((
                l.count(PieceKind::GovBase),
                l.count(PieceKind::FrenchTroops),
                l.count(PieceKind::FrenchPolice),
                l.total(),
            ))
        });
        plans
    }
}
