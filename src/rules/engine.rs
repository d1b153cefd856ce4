//! Player contract and the sequence of play.
//!
//! Each card offers two half-rounds. The first eligible faction may pick any
//! [`ActionChoice`]; the second is limited by what the first one did.
//!
//! ## Implementation Notes
//!
//! - `possible_actions`: the menu offered to the second eligible faction
//! - `conducted_action`: derived from the Turn, never declared by the player
//! - `eligibility_swap`: whether the second faction acts first on the next card

use serde::{Deserialize, Serialize};

use crate::core::{Faction, GameContext, Result, RulesError};
use crate::turn::Turn;

/// What a faction does with its half-round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionChoice {
    Event,
    /// Operation plus Special Activity.
    OpSpecial,
    OpOnly,
    /// Operation in a single space, no Special Activity.
    OpLimited,
    Pass,
}

impl ActionChoice {
    pub const ALL: [ActionChoice; 5] = [
        ActionChoice::Event,
        ActionChoice::OpSpecial,
        ActionChoice::OpOnly,
        ActionChoice::OpLimited,
        ActionChoice::Pass,
    ];
}

impl std::fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionChoice::Event => "event",
            ActionChoice::OpSpecial => "operation + special activity",
            ActionChoice::OpOnly => "operation only",
            ActionChoice::OpLimited => "limited operation",
            ActionChoice::Pass => "pass",
        };
        f.write_str(name)
    }
}

/// Choices left to a faction given what the previous one did this card.
#[must_use]
pub fn possible_actions(previous: Option<ActionChoice>) -> Vec<ActionChoice> {
    use ActionChoice::*;
    match previous {
        None | Some(Pass) => ActionChoice::ALL.to_vec(),
        Some(Event) => vec![OpSpecial, Pass],
        Some(OpOnly) => vec![OpLimited, Pass],
        Some(OpSpecial) => vec![Event, OpLimited, Pass],
        Some(OpLimited) => vec![OpSpecial, OpOnly, Pass],
    }
}

/// Whether an offer restricts any Operation to a single space.
#[must_use]
pub fn limited_op_only(possible: &[ActionChoice]) -> bool {
    possible.contains(&ActionChoice::OpLimited)
        && !possible.contains(&ActionChoice::OpOnly)
        && !possible.contains(&ActionChoice::OpSpecial)
}

/// Whether the first eligible faction hands initiative over by doing
/// `first`.
#[must_use]
pub fn eligibility_swap(first: ActionChoice) -> bool {
    matches!(first, ActionChoice::OpSpecial | ActionChoice::OpLimited)
}

/// The choice a completed turn amounts to.
#[must_use]
pub fn conducted_action(turn: &Turn) -> ActionChoice {
    if turn.special_activity_done() {
        ActionChoice::OpSpecial
    } else if turn.operation_spaces() == 0 {
        ActionChoice::Pass
    } else if turn.limited_op_only() {
        ActionChoice::OpLimited
    } else {
        ActionChoice::OpOnly
    }
}

/// Fail unless `conducted` was on offer.
pub fn check_allowed(conducted: ActionChoice, possible: &[ActionChoice]) -> Result<ActionChoice> {
    if possible.contains(&conducted) {
        Ok(conducted)
    } else {
        Err(RulesError::ActionNotAllowed {
            conducted: conducted.to_string(),
            allowed: possible.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
        })
    }
}

/// A faction's decision maker.
///
/// The player owns the half-round: it builds the Turn held by `ctx`,
/// commits its Actions and reports what it conducted.
pub trait Player {
    fn faction(&self) -> Faction;

    /// Play one half-round.
    ///
    /// `previous` is what the other faction did on this card, if it acted
    /// first.
    fn play(
        &mut self,
        ctx: &mut GameContext,
        previous: Option<ActionChoice>,
        possible: &[ActionChoice],
    ) -> Result<ActionChoice>;
}
