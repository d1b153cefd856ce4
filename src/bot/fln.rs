//! The FLN bot: one half-round of decisions.
//!
//! [`FlnBot`] follows the FLN flowchart: pass when broke and limited,
//! Terror when the initiative or the bases call for it, then Attack when it
//! would hurt the French, then Rally. March is not available.
//!
//! ## Budgets
//!
//! Operations spend at most two thirds of the resources unless they are
//! low; Rally also stops after a number of spaces. When resources run out
//! mid-operation the bot extorts if a Special Activity is still open.
//!
//! ## Rollback
//!
//! Each Operation runs inside [`FlnTurn::attempt`]: one that ends without a
//! selected space is undone, so the next branch of the flowchart starts
//! from a clean board and turn.

use std::cmp::Reverse;

use tracing::{debug, info, warn};

use super::priorities::{pacifiable, plan_casualties, remove_from, spare_guerrillas, FlnBotRules, Losses};
use crate::board::{Alignment, Board, Location, PieceKind, Space, SpaceId, TrackKind};
use crate::cards::Card;
use crate::core::{Faction, GameContext, GameRng, Result, RulesError};
use crate::rules::engine::{check_allowed, conducted_action, eligibility_swap, limited_op_only, ActionChoice, Player};
use crate::rules::fln::{
    max_agitate_cost, max_placable_guerrillas, may_agitate_in, may_extort_in, may_rally_in, may_subvert_in,
    may_terror_in,
};
use crate::turn::{Action, Operation, SpecialActivity, Target};

/// The FLN decision maker.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlnBot;

impl FlnBot {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Player for FlnBot {
    fn faction(&self) -> Faction {
        Faction::Fln
    }

    fn play(
        &mut self,
        ctx: &mut GameContext,
        previous: Option<ActionChoice>,
        possible: &[ActionChoice],
    ) -> Result<ActionChoice> {
        FlnTurn::new(ctx, previous, possible).play()
    }
}

#[derive(Clone, Copy, Debug)]
struct RallyBudget {
    max_spaces: usize,
    cap: i32,
}

/// State of one FLN half-round.
pub(crate) struct FlnTurn<'a> {
    ctx: &'a mut GameContext,
    previous: Option<ActionChoice>,
    possible: Vec<ActionChoice>,
    limited: bool,
    /// Operation resources spent or reserved so far.
    expended: i32,
    /// Space picked for Agitate and the resources set aside for it.
    agitate_at: Option<(SpaceId, u32)>,
}

impl FlnBotRules for FlnTurn<'_> {
    fn board(&self) -> &Board {
        &self.ctx.board
    }

    fn rng(&mut self) -> &mut GameRng {
        &mut self.ctx.rng
    }

    fn limited_op_only(&self) -> bool {
        self.limited
    }

    fn first_eligible(&self) -> bool {
        self.previous.is_none()
    }

    fn will_be_next_first_eligible(&self) -> bool {
        !self.first_eligible() && self.previous.map_or(false, eligibility_swap)
    }
}

fn terror_ready(space: &Space) -> bool {
    may_terror_in(space) && (space.fln_bases() == 0 || space.fln_underground() >= 2)
}

/// Send FLN losses off the map: alternately to Available and Casualties,
/// Available first. Bases always go to Available.
fn attrition(action: &mut Action, id: SpaceId, losses: &Losses) {
    let src = Location::Space(id);
    let mut t = 0;
    for (kind, n) in losses.iter() {
        let (mut available, mut casualties) = (0, 0);
        for _ in 0..n {
            if kind == PieceKind::FlnBase || t % 2 == 0 {
                available += 1;
            } else {
                casualties += 1;
            }
            t += 1;
        }
        let flip = kind == PieceKind::FlnActive;
        action
            .transfer(src, Location::Available, kind, available, flip)
            .transfer(src, Location::Casualties, kind, casualties, flip);
    }
}

impl<'a> FlnTurn<'a> {
    pub(crate) fn new(ctx: &'a mut GameContext, previous: Option<ActionChoice>, possible: &[ActionChoice]) -> Self {
        Self {
            ctx,
            previous,
            possible: possible.to_vec(),
            limited: limited_op_only(possible),
            expended: 0,
            agitate_at: None,
        }
    }

    /// Play the half-round and report what was conducted.
    pub(crate) fn play(mut self) -> Result<ActionChoice> {
        self.ctx.begin_turn(self.limited);
        let start = self.ctx.checkpoint();

        if self.pass_required() {
            debug!("no resources for a limited operation");
            self.pass()?;
        } else if !self.operate()? {
            if self.ctx.board.fln_resources() > 0 {
                return Err(RulesError::NotImplemented("march"));
            }
            self.pass()?;
        }

        let mut conducted = conducted_action(&self.ctx.turn);
        if !self.possible.contains(&conducted) {
            warn!(%conducted, "not on offer, passing instead");
            self.ctx.restore(start);
            self.pass()?;
            conducted = conducted_action(&self.ctx.turn);
        }
        check_allowed(conducted, &self.possible)?;
        info!(
            %conducted,
            cost = self.ctx.turn.cost(),
            resources = self.ctx.board.fln_resources(),
            "FLN half-round"
        );
        Ok(conducted)
    }

    fn operate(&mut self) -> Result<bool> {
        if self.terror_2() || self.terror_1() {
            debug!("terror preferred");
            if self.attempt("terror", Self::terror)? {
                return Ok(true);
            }
        }
        if self.may_play_event() && self.ctx.card.as_ref().map_or(false, Card::fln_effective) {
            return Err(RulesError::NotImplemented("event"));
        }
        if self.attack_worthwhile() {
            debug!("attack worthwhile");
            if self.attempt("attack", Self::attack)? {
                return Ok(true);
            }
        }
        if self.rally_1() || self.rally_2() {
            debug!("rally");
            return self.attempt("rally", Self::rally);
        }
        Ok(false)
    }

    /// Run `f`, undoing its board, turn and budget changes when it reports
    /// that nothing was done.
    pub(crate) fn attempt(&mut self, what: &str, f: impl FnOnce(&mut Self) -> Result<bool>) -> Result<bool> {
        let checkpoint = self.ctx.checkpoint();
        let (expended, agitate_at) = (self.expended, self.agitate_at);
        let done = f(self)?;
        if !done {
            warn!(what, "nothing done, rolled back");
            self.ctx.restore(checkpoint);
            self.expended = expended;
            self.agitate_at = agitate_at;
        }
        Ok(done)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn may_play_event(&self) -> bool {
        self.possible.contains(&ActionChoice::Event) && self.ctx.card.is_some()
    }

    /// Commit the last action, counting Operation costs against the budget.
    fn commit(&mut self) -> Result<()> {
        if let Some(action) = self.ctx.turn.last() {
            if action.kind().selects_for_operation() {
                self.expended += action.cost();
            }
        }
        self.ctx.commit()
    }

    fn pass(&mut self) -> Result<()> {
        self.ctx.turn.pass(1)?;
        self.ctx.commit()
    }

    fn may_continue(&mut self) -> Result<bool> {
        if self.limited && self.ctx.turn.operation_spaces() > 0 {
            return Ok(false);
        }
        if self.ctx.board.fln_resources() > 0 {
            return Ok(true);
        }
        if !self.ctx.turn.may_special_activity(SpecialActivity::Extort) {
            return Ok(false);
        }
        debug!("out of resources, extorting");
        self.extort()?;
        Ok(self.ctx.board.fln_resources() > 0)
    }

    /// Spaces not yet selected for the Operation matching `pred`.
    fn unselected(&self, pred: impl Fn(&Self, &Space) -> bool) -> Vec<SpaceId> {
        self.ctx
            .board
            .search(|s| !self.ctx.turn.operation_selected(s.id()) && pred(self, s))
    }

    fn by_pop(&mut self, mut list: Vec<SpaceId>) -> Vec<SpaceId> {
        self.ctx.rng.shuffle(&mut list);
        list.sort_by_key(|id| Reverse(self.ctx.board.space(*id).pop()));
        list
    }

    /// Subvert, or Extort when Subvert did nothing.
    fn special_activity(&mut self) -> Result<()> {
        if self.ctx.turn.may_special_activity(SpecialActivity::Subvert) && self.subvert()? {
            return Ok(());
        }
        if self.ctx.turn.may_special_activity(SpecialActivity::Extort) {
            self.extort()?;
        }
        Ok(())
    }

    // =========================================================================
    // Terror
    // =========================================================================

    fn terror(&mut self) -> Result<bool> {
        let support = self.ctx.board.search(|s| terror_ready(s) && s.support());
        for id in self.by_pop(support) {
            if !self.may_continue()? {
                break;
            }
            if terror_ready(self.ctx.board.space(id)) {
                self.terror_in(id)?;
            }
        }

        if self.last_campaign() {
            let neutral =
                self.unselected(|_, s| terror_ready(s) && s.neutral() && s.terror() == 0 && pacifiable(s));
            for id in self.by_pop(neutral) {
                if !self.may_continue()? {
                    break;
                }
                if terror_ready(self.ctx.board.space(id)) {
                    self.terror_in(id)?;
                }
            }
        }

        if self.ctx.turn.operation_spaces() == 0 {
            return Ok(false);
        }
        self.special_activity()?;
        Ok(true)
    }

    fn terror_in(&mut self, id: SpaceId) -> Result<()> {
        let space = self.ctx.board.space(id);
        let (place_marker, realign) = (space.terror() == 0, !space.neutral());
        let action = self.ctx.turn.operation_in(Operation::Terror, Target::Space(id), 1)?;
        action.activate(id, 1);
        if place_marker {
            action.set_terror(id, 1);
        }
        if realign {
            action.set_alignment(id, Alignment::Neutral);
        }
        self.commit()?;
        debug!(space = self.ctx.board.space(id).name(), "terror");
        Ok(())
    }

    // =========================================================================
    // Extort / Subvert
    // =========================================================================

    /// Extort never takes the last underground guerrilla of an Algerian base.
    fn extort_ready(&self, space: &Space) -> bool {
        may_extort_in(space)
            && (space.is_country() || space.fln_bases() == 0 || space.fln_underground() >= 2)
            && !self.ctx.turn.special_activity_selected(space.id())
    }

    fn extort(&mut self) -> Result<bool> {
        let spaces = self.ctx.board.search(|s| self.extort_ready(s));
        let board = &self.ctx.board;
        let (first, rest): (Vec<SpaceId>, Vec<SpaceId>) = spaces.into_iter().partition(|id| {
            let s = board.space(*id);
            s.guerrillas() > 3 || (s.guerrillas() > 2 && (s.gov_cubes() == 0 || s.fln_bases() == 0))
        });
        let (countries, rest): (Vec<SpaceId>, Vec<SpaceId>) =
            rest.into_iter().partition(|id| board.space(*id).is_country());

        let mut extorted = 0;
        for id in first.into_iter().chain(countries) {
            extorted += u32::from(self.extort_in(id)?);
        }
        if extorted == 0 || self.ctx.board.fln_resources() == 0 {
            for id in rest {
                extorted += u32::from(self.extort_in(id)?);
            }
        }
        Ok(extorted > 0)
    }

    fn extort_in(&mut self, id: SpaceId) -> Result<bool> {
        if !self.extort_ready(self.ctx.board.space(id)) {
            return Ok(false);
        }
        self.ctx
            .turn
            .special_activity_in(SpecialActivity::Extort, Target::Space(id), -1)?
            .extort(id);
        self.ctx.commit()?;
        debug!(space = self.ctx.board.space(id).name(), "extort");
        Ok(true)
    }

    /// Up to 2 spaces, 2 cubes.
    fn subvert(&mut self) -> Result<bool> {
        let turn = &self.ctx.turn;
        let mut spaces = self
            .ctx
            .board
            .search(|s| may_subvert_in(s) && !turn.special_activity_selected(s.id()));

        let board = &self.ctx.board;
        let mut clearing: Vec<SpaceId> = spaces
            .iter()
            .copied()
            .filter(|id| {
                let s = board.space(*id);
                s.french_cubes() == 0 && s.algerian_cubes() < 3
            })
            .collect();
        self.ctx.rng.shuffle(&mut clearing);
        clearing.sort_by_key(|id| {
            let s = self.ctx.board.space(*id);
            Reverse((s.algerian_police(), s.algerian_troops()))
        });

        let (mut used, mut removed) = (0, 0);
        for id in clearing.into_iter().take(2) {
            if removed >= 2 {
                break;
            }
            removed += self.subvert_remove(id, 2 - removed)?;
            used += 1;
            spaces.retain(|s| *s != id);
        }

        if removed == 0 && self.ctx.board.available().fln_underground() > 0 {
            let board = &self.ctx.board;
            let police: Vec<SpaceId> = spaces
                .iter()
                .copied()
                .filter(|id| board.space(*id).algerian_police() > 0)
                .collect();
            if let Some(id) = self.ctx.rng.choose(&police).copied() {
                self.subvert_replace(id)?;
                return Ok(true);
            }
        }

        if used < 2 && removed < 2 && (removed == 1 || !self.first_eligible()) {
            if let Some(id) = self.ctx.rng.choose(&spaces).copied() {
                self.subvert_remove(id, 2 - removed)?;
                used += 1;
            }
        }
        Ok(used > 0)
    }

    fn subvert_remove(&mut self, id: SpaceId, max: u32) -> Result<u32> {
        let space = self.ctx.board.space(id);
        let police = space.algerian_police().min(max);
        let troops = space.algerian_troops().min(max - police);
        let here = Location::Space(id);
        self.ctx
            .turn
            .special_activity_in(SpecialActivity::Subvert, Target::Space(id), 0)?
            .transfer(here, Location::Available, PieceKind::AlgerianPolice, police, false)
            .transfer(here, Location::Available, PieceKind::AlgerianTroops, troops, false);
        self.ctx.commit()?;
        debug!(space = self.ctx.board.space(id).name(), police, troops, "subvert");
        Ok(police + troops)
    }

    fn subvert_replace(&mut self, id: SpaceId) -> Result<()> {
        let here = Location::Space(id);
        self.ctx
            .turn
            .special_activity_in(SpecialActivity::Subvert, Target::Space(id), 0)?
            .transfer(here, Location::Available, PieceKind::AlgerianPolice, 1, false)
            .transfer(Location::Available, here, PieceKind::FlnUnderground, 1, false);
        self.ctx.commit()?;
        debug!(space = self.ctx.board.space(id).name(), "subvert: police replaced");
        Ok(())
    }

    // =========================================================================
    // Attack
    // =========================================================================

    fn attack_candidates(&self) -> Vec<SpaceId> {
        let ambush = self.ctx.turn.may_special_activity(SpecialActivity::Ambush);
        self.ctx.board.search(|s| {
            s.gov() > 0
                && !s.is_country()
                && if ambush {
                    (s.fln_bases() == 0 && (s.guerrillas() > 5 || s.fln_underground() >= 1))
                        || (s.fln_bases() > 0 && s.fln_underground() >= 2)
                } else {
                    s.fln_bases() == 0 && s.guerrillas() > 5
                }
        })
    }

    /// Whether the planned removals take out more than 2 French pieces.
    fn attack_worthwhile(&mut self) -> bool {
        let candidates = self.attack_candidates();
        let plans = self.attack_priority(&candidates);
        plans.iter().map(|(_, losses)| losses.french()).sum::<u32>() > 2
    }

    fn attack(&mut self) -> Result<bool> {
        let candidates = self.attack_candidates();
        let plans = self.attack_priority(&candidates);
        let mut ambushes = 0;
        for (id, _) in plans {
            if !self.may_continue()? {
                break;
            }
            let space = self.ctx.board.space(id);
            if space.guerrillas() > 5 {
                self.attack_in(id)?;
            } else if ambushes < 2
                && space.fln_underground() > 0
                && self.ctx.turn.may_special_activity(SpecialActivity::Ambush)
            {
                self.ambush_in(id)?;
                ambushes += 1;
            }
        }

        if self.may_continue()? {
            let turn = &self.ctx.turn;
            let rolled = self.ctx.board.search(|s| {
                s.gov() > 0 && !s.is_country() && s.guerrillas() > 3 && !turn.operation_selected(s.id())
            });
            let first = self.attack_priority(&rolled).first().map(|(id, _)| *id);
            if let Some(id) = first {
                self.attack_in(id)?;
            }
        }

        if self.ctx.turn.operation_spaces() == 0 {
            return Ok(false);
        }
        if self.ctx.turn.may_special_activity(SpecialActivity::Extort) {
            self.extort()?;
        }
        Ok(true)
    }

    /// One underground guerrilla goes active and removes a single piece, with
    /// no attrition.
    fn ambush_in(&mut self, id: SpaceId) -> Result<()> {
        let losses = plan_casualties(self.ctx.board.space(id), 1);
        let action = self
            .ctx
            .turn
            .special_activity_in(SpecialActivity::Ambush, Target::Space(id), 1)?;
        action.activate(id, 1);
        for (kind, n) in losses.iter() {
            action.transfer(Location::Space(id), Location::Casualties, kind, n, false);
        }
        self.commit()?;
        debug!(space = self.ctx.board.space(id).name(), removed = losses.total(), "ambush");
        Ok(())
    }

    /// Every guerrilla goes active. More than 5 guerrillas succeed outright,
    /// otherwise a die at or under the guerrilla count does. Success removes
    /// up to 2 pieces; a roll of 1 also flips a guerrilla back underground.
    fn attack_in(&mut self, id: SpaceId) -> Result<()> {
        let guerrillas = self.ctx.board.space(id).guerrillas();
        let roll = if guerrillas > 5 { None } else { Some(self.d6()) };
        let success = roll.map_or(true, |r| u32::from(r) <= guerrillas);

        let space = self.ctx.board.space(id);
        let underground = space.fln_underground();
        let losses = if success { plan_casualties(space, 2) } else { Losses::default() };
        let mut after = space.clone();
        after.activate(underground)?;
        // only French pieces and bases cost the FLN a piece
        let fln_losses = remove_from(&after, losses.french());
        let flip_back = roll == Some(1) && after.fln_active() > fln_losses.count(PieceKind::FlnActive);

        let action = self.ctx.turn.operation_in(Operation::Attack, Target::Space(id), 1)?;
        action.activate(id, underground);
        for (kind, n) in losses.iter() {
            action.transfer(Location::Space(id), Location::Casualties, kind, n, false);
        }
        attrition(action, id, &fln_losses);
        if flip_back {
            action.transfer(Location::Space(id), Location::Space(id), PieceKind::FlnActive, 1, true);
        }
        self.commit()?;
        debug!(
            space = self.ctx.board.space(id).name(),
            ?roll,
            removed = losses.total(),
            lost = fln_losses.total(),
            "attack"
        );
        Ok(())
    }

    // =========================================================================
    // Rally
    // =========================================================================

    fn rally_stop(&mut self, budget: &RallyBudget) -> Result<bool> {
        Ok(self.ctx.turn.operation_spaces() >= budget.max_spaces
            || self.expended >= budget.cap
            || !self.may_continue()?)
    }

    fn rally(&mut self) -> Result<bool> {
        let budget = RallyBudget {
            max_spaces: if self.limited { 1 } else { self.ctx.options.max_rally_spaces },
            cap: self.ctx.options.spend_cap(self.ctx.board.fln_resources()),
        };
        debug!(?budget, "rally budget");

        // bases
        for step in [1, 2] {
            while !self.rally_stop(&budget)? && self.ctx.board.available().fln_bases() > 0 {
                let candidates = self.unselected(|r, s| {
                    r.may_add_base_in(s) && if step == 1 { r.rally_1_in(s) } else { r.rally_2_in(s) }
                });
                let Some(id) = self.ctx.rng.choose(&candidates).copied() else {
                    break;
                };
                self.place_base(id)?;
            }
        }

        // guerrillas at bases short of underground
        while !self.rally_stop(&budget)? && self.fln_to_place(None) > 0 {
            let candidates = self.unselected(|r, s| r.rally_3_in(s) && may_rally_in(s));
            let Some(id) = self.rally_3_priority(&candidates) else {
                break;
            };
            if !self.place_guerrillas(id)? {
                break;
            }
        }

        if !self.rally_stop(&budget)? && self.ctx.board.france_track() < self.ctx.board.track(TrackKind::France).max() {
            self.ctx
                .turn
                .operation_in(Operation::Rally, Target::Track(TrackKind::France), 1)?
                .shift(TrackKind::France, 1);
            self.commit()?;
            debug!(france = self.ctx.board.france_track(), "france track shifted");
        }

        // Support spaces with no underground guerrilla
        while !self.rally_stop(&budget)? && self.fln_to_place(None) > 0 {
            let candidates = self.unselected(|r, s| r.rally_5_in(s) && may_rally_in(s));
            let ranked = self.rally_5_priority(&candidates);
            if !self.place_first(ranked)? {
                break;
            }
        }

        if self.expended < budget.cap && self.may_continue()? {
            let candidates = self.ctx.board.search(|s| self.rally_6_in(s));
            self.reserve_agitate(&budget, candidates)?;
        }

        // anywhere
        for _ in 0..2 {
            if self.rally_stop(&budget)? || self.fln_to_place(None) == 0 {
                break;
            }
            let candidates = self.unselected(|_, s| may_rally_in(s));
            let to_place = self.fln_to_place(None);
            let ranked = self.rally_7_priority(&candidates, to_place);
            if !self.place_first(ranked)? {
                break;
            }
        }

        // FLN without a base
        for _ in 0..2 {
            if self.rally_stop(&budget)? || self.fln_to_place(None) == 0 {
                break;
            }
            let candidates = self.unselected(|r, s| r.rally_8_in(s) && may_rally_in(s));
            let ranked = self.rally_8_priority(&candidates);
            if !self.place_first(ranked)? {
                break;
            }
        }

        if self.agitate_at.is_none() && self.may_continue()? {
            let candidates = self.ctx.board.search(may_agitate_in);
            self.reserve_agitate(&budget, candidates)?;
        }
        if let Some((id, reserved)) = self.agitate_at {
            if self.may_continue()? {
                self.agitate(id, reserved)?;
            }
        }

        debug!(
            expended = self.expended,
            spaces = self.ctx.turn.operation_spaces(),
            "rally done"
        );
        if self.ctx.turn.operation_spaces() == 0 {
            return Ok(false);
        }
        self.special_activity()?;
        Ok(true)
    }

    /// Trade 2 guerrillas for a base, active ones first.
    fn place_base(&mut self, id: SpaceId) -> Result<()> {
        let active = self.ctx.board.space(id).fln_active().min(2);
        let here = Location::Space(id);
        self.ctx
            .turn
            .operation_in(Operation::Rally, Target::Space(id), 1)?
            .transfer(here, Location::Available, PieceKind::FlnActive, active, true)
            .transfer(here, Location::Available, PieceKind::FlnUnderground, 2 - active, false)
            .transfer(Location::Available, here, PieceKind::FlnBase, 1, false);
        self.commit()?;
        debug!(space = self.ctx.board.space(id).name(), "base placed");
        Ok(())
    }

    /// Place guerrillas in `id`, from Available first, then active guerrillas
    /// other spaces can spare, moved in underground.
    ///
    /// With nothing to place, a base space flips its active guerrillas
    /// underground instead.
    fn place_guerrillas(&mut self, id: SpaceId) -> Result<bool> {
        let space = self.ctx.board.space(id);
        let (bases, active) = (space.fln_bases(), space.fln_active());
        let n = max_placable_guerrillas(space).min(self.fln_to_place(Some(id)));
        let here = Location::Space(id);

        if n == 0 {
            if bases == 0 || active == 0 {
                return Ok(false);
            }
            self.ctx
                .turn
                .operation_in(Operation::Rally, Target::Space(id), 1)?
                .transfer(here, here, PieceKind::FlnActive, active, true);
            self.commit()?;
            debug!(space = self.ctx.board.space(id).name(), active, "guerrillas flipped underground");
            return Ok(true);
        }

        let from_available = n.min(self.ctx.board.available().fln_underground());
        let mut left = n - from_available;
        let mut used = vec![id];
        let mut sources = Vec::new();
        while left > 0 {
            let Some(src) = self.place_from(&used) else {
                break;
            };
            let k = spare_guerrillas(self.ctx.board.space(src)).min(left);
            sources.push((src, k));
            used.push(src);
            left -= k;
        }

        let action = self.ctx.turn.operation_in(Operation::Rally, Target::Space(id), 1)?;
        action.transfer(Location::Available, here, PieceKind::FlnUnderground, from_available, false);
        for (src, k) in sources {
            action.transfer(Location::Space(src), here, PieceKind::FlnActive, k, true);
        }
        self.commit()?;
        debug!(space = self.ctx.board.space(id).name(), placed = n - left, "guerrillas placed");
        Ok(true)
    }

    /// Place in the best of `list`, falling back to the next one.
    fn place_first(&mut self, mut list: Vec<SpaceId>) -> Result<bool> {
        while let Some(id) = self.place_in(&list) {
            if self.place_guerrillas(id)? {
                return Ok(true);
            }
            list.retain(|s| *s != id);
        }
        Ok(false)
    }

    /// Pick the space to Agitate in at the end of the Rally and set aside
    /// what the budget allows of its cost. An unselected space gets
    /// guerrillas first.
    fn reserve_agitate(&mut self, budget: &RallyBudget, candidates: Vec<SpaceId>) -> Result<()> {
        let remaining = budget.cap - self.expended;
        let room = self.ctx.turn.operation_spaces() < budget.max_spaces && self.fln_to_place(None) > 0;
        let (board, turn) = (&self.ctx.board, &self.ctx.turn);
        let mut list: Vec<SpaceId> = candidates
            .into_iter()
            .filter(|id| {
                let selected = turn.operation_selected(*id);
                (selected || (room && may_rally_in(board.space(*id)))) && i32::from(!selected) < remaining
            })
            .collect();
        self.ctx.rng.shuffle(&mut list);
        list.sort_by_key(|id| {
            let s = self.ctx.board.space(*id);
            (Reverse(s.pop()), s.terror(), !s.support(), !self.ctx.turn.operation_selected(*id))
        });

        for id in list {
            if !self.ctx.turn.operation_selected(id) && !self.place_guerrillas(id)? {
                continue;
            }
            let left = (budget.cap - self.expended).max(0) as u32;
            let reserved = max_agitate_cost(self.ctx.board.space(id)).min(left);
            if reserved > 0 {
                self.agitate_at = Some((id, reserved));
                self.expended += reserved as i32;
                debug!(space = self.ctx.board.space(id).name(), reserved, "agitate reserved");
            }
            return Ok(());
        }
        Ok(())
    }

    /// Remove what terror `budget` and the resources allow, then shift
    /// toward Oppose if all of it went and a resource is left.
    fn agitate(&mut self, id: SpaceId, budget: u32) -> Result<()> {
        let space = self.ctx.board.space(id);
        let budget = budget.min(self.ctx.board.fln_resources().max(0) as u32);
        let terror = space.terror().min(budget);
        let shift = !space.oppose() && terror == space.terror() && budget > terror;
        if terror == 0 && !shift {
            return Ok(());
        }
        self.ctx.turn.agitate_in(id, terror, shift)?;
        self.ctx.commit()?;
        debug!(space = self.ctx.board.space(id).name(), terror, shift, "agitate");
        Ok(())
    }
}
