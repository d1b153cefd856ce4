//! The per half-round ledger.
//!
//! A [`Turn`] holds at most one Operation kind and at most one Special
//! Activity kind, the actions taken so far and the limited-operation flag.
//! Every selection goes through a guard; a rejected selection leaves the
//! ledger unchanged.
//!
//! ## States
//!
//! - empty
//! - Operation selected (Rally, Attack, ...)
//! - Operation and Special Activity selected
//! - Special Activity selected alone, then Operation: Ambush claims Attack

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKind, Operation, SpecialActivity, Target};
use crate::board::SpaceId;
use crate::core::{Result, RulesError};

/// One player's half-round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    operation: Option<Operation>,
    special_activity: Option<SpecialActivity>,
    actions: Vector<Action>,
    limited_op_only: bool,
}

impl Turn {
    /// An empty turn.
    #[must_use]
    pub fn new(limited_op_only: bool) -> Self {
        Self {
            limited_op_only,
            ..Self::default()
        }
    }

    /// Start over for a new half-round.
    pub fn reset(&mut self, limited_op_only: bool) {
        *self = Self::new(limited_op_only);
    }

    #[must_use]
    pub fn limited_op_only(&self) -> bool {
        self.limited_op_only
    }

    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    #[must_use]
    pub fn special_activity(&self) -> Option<SpecialActivity> {
        self.special_activity
    }

    #[must_use]
    pub fn actions(&self) -> &Vector<Action> {
        &self.actions
    }

    /// The most recent action.
    #[must_use]
    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Action> {
        self.actions.back_mut()
    }

    #[must_use]
    pub fn operation_done(&self) -> bool {
        self.operation.is_some()
    }

    #[must_use]
    pub fn special_activity_done(&self) -> bool {
        self.special_activity.is_some()
    }

    /// Whether `sa` may still be selected this turn.
    #[must_use]
    pub fn may_special_activity(&self, sa: SpecialActivity) -> bool {
        !self.limited_op_only && self.special_activity.map_or(true, |current| current == sa)
    }

    /// Number of spaces (and tracks) selected for the Operation.
    #[must_use]
    pub fn operation_spaces(&self) -> usize {
        self.actions.iter().filter(|a| a.kind().selects_for_operation()).count()
    }

    /// Number of spaces selected for the Special Activity.
    #[must_use]
    pub fn special_activity_spaces(&self) -> usize {
        self.actions.iter().filter(|a| a.kind().special_activity().is_some()).count()
    }

    /// Whether `space` is selected for the Operation.
    #[must_use]
    pub fn operation_selected(&self, space: SpaceId) -> bool {
        self.target_selected(Target::Space(space), |kind| kind.selects_for_operation())
    }

    /// Whether `space` is selected for the Special Activity.
    #[must_use]
    pub fn special_activity_selected(&self, space: SpaceId) -> bool {
        self.target_selected(Target::Space(space), |kind| kind.special_activity().is_some())
    }

    fn target_selected(&self, target: Target, kinds: impl Fn(ActionKind) -> bool) -> bool {
        target != Target::Nothing && self.actions.iter().any(|a| a.target() == target && kinds(a.kind()))
    }

    /// Spaces selected for the Operation, in selection order.
    #[must_use]
    pub fn operation_targets(&self) -> Vec<SpaceId> {
        self.actions
            .iter()
            .filter(|a| a.kind().selects_for_operation())
            .filter_map(Action::space)
            .collect()
    }

    /// Total resources spent; refunds count negative.
    #[must_use]
    pub fn cost(&self) -> i32 {
        self.actions.iter().map(Action::cost).sum()
    }

    /// Resources spent on the Operation, Agitate included.
    #[must_use]
    pub fn operation_cost(&self) -> i32 {
        self.actions
            .iter()
            .filter(|a| a.kind().special_activity().is_none())
            .map(Action::cost)
            .sum()
    }

    /// Resources spent on or gained by the Special Activity.
    #[must_use]
    pub fn special_activity_cost(&self) -> i32 {
        self.actions
            .iter()
            .filter(|a| a.kind().special_activity().is_some())
            .map(Action::cost)
            .sum()
    }

    fn push(&mut self, action: Action) -> &mut Action {
        self.actions.push_back(action);
        let last = self.actions.len() - 1;
        &mut self.actions[last]
    }

    /// Pass, gaining `refund` resources.
    pub fn pass(&mut self, refund: i32) -> Result<&mut Action> {
        let action = self.operation_in(Operation::Pass, Target::Nothing, -refund)?;
        Ok(action.pass())
    }

    /// Select `target` for `op` at `cost`.
    pub fn operation_in(&mut self, op: Operation, target: Target, cost: i32) -> Result<&mut Action> {
        if let Some(current) = self.operation {
            if self.limited_op_only {
                return Err(RulesError::LimitedOperation(op.to_string()));
            }
            if current != op {
                return Err(RulesError::OperationConflict {
                    attempted: op.to_string(),
                    current: current.to_string(),
                });
            }
        }
        if self.target_selected(target, |kind| kind.selects_for_operation()) {
            return Err(RulesError::AlreadySelected {
                target: target.to_string(),
                kind: op.to_string(),
            });
        }
        self.operation = Some(op);
        Ok(self.push(Action::new(op.into(), target, cost)))
    }

    /// Select `target` for `sa` at `cost`.
    pub fn special_activity_in(&mut self, sa: SpecialActivity, target: Target, cost: i32) -> Result<&mut Action> {
        if self.limited_op_only {
            return Err(RulesError::LimitedOperation(sa.to_string()));
        }
        if let Some(current) = self.special_activity {
            if current != sa {
                return Err(RulesError::SpecialActivityConflict {
                    attempted: sa.to_string(),
                    current: current.to_string(),
                });
            }
        }
        if sa == SpecialActivity::Ambush {
            if let Some(current) = self.operation.filter(|op| *op != Operation::Attack) {
                return Err(RulesError::OperationConflict {
                    attempted: sa.to_string(),
                    current: current.to_string(),
                });
            }
            if self.target_selected(target, |kind| kind.selects_for_operation()) {
                return Err(RulesError::AlreadySelected {
                    target: target.to_string(),
                    kind: Operation::Attack.to_string(),
                });
            }
        }
        if self.target_selected(target, |kind| kind.special_activity().is_some()) {
            return Err(RulesError::AlreadySelected {
                target: target.to_string(),
                kind: sa.to_string(),
            });
        }
        self.special_activity = Some(sa);
        if sa == SpecialActivity::Ambush {
            self.operation = Some(Operation::Attack);
        }
        Ok(self.push(Action::new(sa.into(), target, cost)))
    }

    /// Agitate in a space already selected for Rally.
    ///
    /// Costs one resource per terror marker removed plus one for the shift.
    pub fn agitate_in(&mut self, space: SpaceId, terror: u32, shift: bool) -> Result<&mut Action> {
        if self.operation != Some(Operation::Rally) || !self.operation_selected(space) {
            return Err(RulesError::AgitateWithoutRally(space.to_string()));
        }
        if self.target_selected(Target::Space(space), |kind| kind == ActionKind::Agitate) {
            return Err(RulesError::AlreadySelected {
                target: space.to_string(),
                kind: ActionKind::Agitate.to_string(),
            });
        }
        let cost = terror as i32 + i32::from(shift);
        let action = self.push(Action::new(ActionKind::Agitate, Target::Space(space), cost));
        Ok(action.agitate(space, terror, shift))
    }

    /// Drop every action aimed at `space`, releasing its selections.
    ///
    /// Kinds left without any action are cleared too.
    pub fn discard_selection(&mut self, space: SpaceId) {
        self.actions.retain(|a| a.space() != Some(space));
        if !self.actions.iter().any(|a| a.kind().operation().is_some() || a.kind() == ActionKind::Ambush) {
            self.operation = None;
        }
        if self.special_activity_spaces() == 0 {
            self.special_activity = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TrackKind;

    const A: SpaceId = SpaceId(1);
    const B: SpaceId = SpaceId(2);

    #[test]
    fn test_empty_turn() {
        let turn = Turn::new(false);
        assert!(!turn.operation_done());
        assert!(!turn.special_activity_done());
        assert_eq!(turn.operation_spaces(), 0);
        assert_eq!(turn.cost(), 0);
        assert!(turn.may_special_activity(SpecialActivity::Extort));
    }

    #[test]
    fn test_pass_refunds() {
        let mut turn = Turn::new(true);
        turn.pass(1).unwrap();
        assert_eq!(turn.cost(), -1);
        assert_eq!(turn.operation(), Some(Operation::Pass));
        assert_eq!(turn.operation_spaces(), 0);
        assert!(turn.operation_in(Operation::Rally, Target::Space(A), 1).is_err());
    }

    #[test]
    fn test_operation_conflict() {
        let mut turn = Turn::new(false);
        turn.operation_in(Operation::Rally, Target::Space(A), 1).unwrap();
        let err = turn.operation_in(Operation::Attack, Target::Space(B), 1).unwrap_err();
        assert!(matches!(err, RulesError::OperationConflict { .. }));
        assert_eq!(turn.actions().len(), 1);
    }

    #[test]
    fn test_space_selected_once() {
        let mut turn = Turn::new(false);
        turn.operation_in(Operation::Rally, Target::Space(A), 1).unwrap();
        assert!(turn.operation_in(Operation::Rally, Target::Space(A), 1).is_err());
        turn.operation_in(Operation::Rally, Target::Space(B), 1).unwrap();
        turn.operation_in(Operation::Rally, Target::Track(TrackKind::France), 1).unwrap();
        assert!(turn.operation_in(Operation::Rally, Target::Track(TrackKind::France), 1).is_err());
        assert_eq!(turn.operation_spaces(), 3);
        assert_eq!(turn.operation_targets(), vec![A, B]);
        assert_eq!(turn.cost(), 3);
    }

    #[test]
    fn test_limited_allows_one_operation() {
        let mut turn = Turn::new(true);
        turn.operation_in(Operation::Terror, Target::Space(A), 1).unwrap();
        let err = turn.operation_in(Operation::Terror, Target::Space(B), 1).unwrap_err();
        assert!(matches!(err, RulesError::LimitedOperation(_)));
        assert!(turn.special_activity_in(SpecialActivity::Extort, Target::Space(A), -1).is_err());
        assert!(!turn.may_special_activity(SpecialActivity::Extort));
    }

    #[test]
    fn test_special_activity_conflict() {
        let mut turn = Turn::new(false);
        turn.special_activity_in(SpecialActivity::Extort, Target::Space(A), -1).unwrap();
        turn.special_activity_in(SpecialActivity::Extort, Target::Space(B), -1).unwrap();
        assert!(turn.special_activity_in(SpecialActivity::Extort, Target::Space(B), -1).is_err());
        let err = turn.special_activity_in(SpecialActivity::Subvert, Target::Space(A), 0).unwrap_err();
        assert!(matches!(err, RulesError::SpecialActivityConflict { .. }));
        assert!(!turn.may_special_activity(SpecialActivity::Subvert));
        assert_eq!(turn.special_activity_spaces(), 2);
        assert_eq!(turn.special_activity_cost(), -2);
    }

    #[test]
    fn test_ambush_claims_attack() {
        let mut turn = Turn::new(false);
        turn.special_activity_in(SpecialActivity::Ambush, Target::Space(A), 1).unwrap();
        assert_eq!(turn.operation(), Some(Operation::Attack));
        assert!(turn.operation_selected(A));
        assert!(turn.operation_in(Operation::Attack, Target::Space(A), 1).is_err());
        assert!(turn.operation_in(Operation::Rally, Target::Space(B), 1).is_err());
        turn.operation_in(Operation::Attack, Target::Space(B), 1).unwrap();
        assert_eq!(turn.operation_spaces(), 2);
    }

    #[test]
    fn test_ambush_after_rally_fails() {
        let mut turn = Turn::new(false);
        turn.operation_in(Operation::Rally, Target::Space(A), 1).unwrap();
        assert!(turn.special_activity_in(SpecialActivity::Ambush, Target::Space(B), 1).is_err());
        assert_eq!(turn.special_activity(), None);
    }

    #[test]
    fn test_agitate_requires_rally() {
        let mut turn = Turn::new(false);
        assert!(turn.agitate_in(A, 1, true).is_err());

        turn.operation_in(Operation::Rally, Target::Space(A), 1).unwrap();
        assert!(turn.agitate_in(B, 1, true).is_err());

        let action = turn.agitate_in(A, 2, true).unwrap();
        assert_eq!(action.cost(), 3);
        assert!(turn.agitate_in(A, 1, false).is_err());
        assert_eq!(turn.operation_cost(), 4);
        assert_eq!(turn.operation_spaces(), 1);
    }

    #[test]
    fn test_reset() {
        let mut turn = Turn::new(false);
        turn.operation_in(Operation::Rally, Target::Space(A), 1).unwrap();
        turn.reset(true);
        assert_eq!(turn, Turn::new(true));
    }

    #[test]
    fn test_discard_selection() {
        let mut turn = Turn::new(false);
        turn.operation_in(Operation::Rally, Target::Space(A), 1).unwrap();
        turn.operation_in(Operation::Rally, Target::Space(B), 1).unwrap();
        turn.discard_selection(A);
        assert!(!turn.operation_selected(A));
        assert_eq!(turn.operation(), Some(Operation::Rally));

        turn.discard_selection(B);
        assert_eq!(turn.operation(), None);
        turn.operation_in(Operation::Attack, Target::Space(A), 1).unwrap();
    }
}
