//! Actions: one selected space (or track) and the steps executed there.
//!
//! An action is built by exactly one decision routine, replayed against the
//! board by [`Board::apply`](crate::board::Board::apply), then frozen in the
//! turn log. Steps form a closed set; each carries only the fields it needs.
//!
//! ```
//! use colonial_twilight::board::{Location, PieceKind, SpaceId};
//! use colonial_twilight::turn::{Action, ActionKind, Step, Target};
//!
//! let space = SpaceId::new(3);
//! let mut rally = Action::new(ActionKind::Rally, Target::Space(space), 1);
//! rally.transfer(Location::Available, Location::Space(space), PieceKind::FlnUnderground, 2, false);
//! rally.activate(space, 0); // no-op
//! assert_eq!(rally.steps().len(), 1);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Alignment, Control, ControlChange, Location, PieceKind, SpaceId, TrackKind};

/// The four Operations, plus passing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Pass,
    Rally,
    March,
    Attack,
    Terror,
}

/// The four Special Activities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialActivity {
    Extort,
    Subvert,
    Ambush,
    Oas,
}

/// What an action does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Pass,
    Rally,
    March,
    Attack,
    Terror,
    Extort,
    Subvert,
    Ambush,
    Oas,
    /// Rally add-on spending resources to remove terror and shift to Oppose.
    Agitate,
}

impl ActionKind {
    /// The Operation this action belongs to, if any.
    #[must_use]
    pub const fn operation(self) -> Option<Operation> {
        match self {
            ActionKind::Pass => Some(Operation::Pass),
            ActionKind::Rally => Some(Operation::Rally),
            ActionKind::March => Some(Operation::March),
            ActionKind::Attack => Some(Operation::Attack),
            ActionKind::Terror => Some(Operation::Terror),
            _ => None,
        }
    }

    /// The Special Activity this action belongs to, if any.
    #[must_use]
    pub const fn special_activity(self) -> Option<SpecialActivity> {
        match self {
            ActionKind::Extort => Some(SpecialActivity::Extort),
            ActionKind::Subvert => Some(SpecialActivity::Subvert),
            ActionKind::Ambush => Some(SpecialActivity::Ambush),
            ActionKind::Oas => Some(SpecialActivity::Oas),
            _ => None,
        }
    }

    /// Whether this action selects its space for the Operation.
    ///
    /// Ambush is an attack in its space, so it counts.
    #[must_use]
    pub const fn selects_for_operation(self) -> bool {
        matches!(
            self,
            ActionKind::Rally | ActionKind::March | ActionKind::Attack | ActionKind::Terror | ActionKind::Ambush
        )
    }
}

impl From<Operation> for ActionKind {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Pass => ActionKind::Pass,
            Operation::Rally => ActionKind::Rally,
            Operation::March => ActionKind::March,
            Operation::Attack => ActionKind::Attack,
            Operation::Terror => ActionKind::Terror,
        }
    }
}

impl From<SpecialActivity> for ActionKind {
    fn from(sa: SpecialActivity) -> Self {
        match sa {
            SpecialActivity::Extort => ActionKind::Extort,
            SpecialActivity::Subvert => ActionKind::Subvert,
            SpecialActivity::Ambush => ActionKind::Ambush,
            SpecialActivity::Oas => ActionKind::Oas,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Pass => "pass",
            ActionKind::Rally => "rally",
            ActionKind::March => "march",
            ActionKind::Attack => "attack",
            ActionKind::Terror => "terror",
            ActionKind::Extort => "extort",
            ActionKind::Subvert => "subvert",
            ActionKind::Ambush => "ambush",
            ActionKind::Oas => "OAS",
            ActionKind::Agitate => "agitate",
        };
        f.write_str(name)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ActionKind::from(*self).fmt(f)
    }
}

impl std::fmt::Display for SpecialActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ActionKind::from(*self).fmt(f)
    }
}

/// What an action is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Space(SpaceId),
    Track(TrackKind),
    /// Passing aims at nothing.
    Nothing,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Space(id) => write!(f, "space {id}"),
            Target::Track(track) => write!(f, "{track}"),
            Target::Nothing => write!(f, "nothing"),
        }
    }
}

/// A primitive board effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Pass,
    /// Flip underground guerrillas active.
    Activate { space: SpaceId, num: u32 },
    /// Move pieces, flipping guerrillas on arrival when `flip` is set.
    /// The control annotations are filled in when the step is applied.
    Transfer {
        src: Location,
        dst: Location,
        what: PieceKind,
        num: u32,
        flip: bool,
        src_control: Option<ControlChange>,
        dst_control: Option<ControlChange>,
    },
    Shift { track: TrackKind, amount: i32 },
    SetTerror { space: SpaceId, terror: u32 },
    SetAlignment { space: SpaceId, alignment: Alignment },
    /// Flip one underground guerrilla active for a resource.
    Extort { space: SpaceId },
    /// Remove terror, then optionally shift one step toward Oppose.
    Agitate { space: SpaceId, terror: u32, shift: bool },
}

/// One executed step group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    kind: ActionKind,
    target: Target,
    cost: i32,
    steps: SmallVec<[Step; 4]>,
    /// FLN resources once the action was paid for.
    resources: Option<i32>,
}

impl Action {
    /// A new action with no steps.
    #[must_use]
    pub fn new(kind: ActionKind, target: Target, cost: i32) -> Self {
        Self {
            kind,
            target,
            cost,
            steps: SmallVec::new(),
            resources: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Target space, if the action targets one.
    #[must_use]
    pub fn space(&self) -> Option<SpaceId> {
        match self.target {
            Target::Space(id) => Some(id),
            _ => None,
        }
    }

    /// Resources spent; negative for refunds.
    #[must_use]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub(crate) fn steps_mut(&mut self) -> &mut [Step] {
        &mut self.steps
    }

    #[must_use]
    pub fn resources(&self) -> Option<i32> {
        self.resources
    }

    pub(crate) fn set_resources(&mut self, resources: i32) {
        self.resources = Some(resources);
    }

    pub fn pass(&mut self) -> &mut Self {
        self.steps.push(Step::Pass);
        self
    }

    pub fn activate(&mut self, space: SpaceId, num: u32) -> &mut Self {
        if num > 0 {
            self.steps.push(Step::Activate { space, num });
        }
        self
    }

    pub fn transfer(&mut self, src: Location, dst: Location, what: PieceKind, num: u32, flip: bool) -> &mut Self {
        if num > 0 {
            self.steps.push(Step::Transfer {
                src,
                dst,
                what,
                num,
                flip,
                src_control: None,
                dst_control: None,
            });
        }
        self
    }

    pub fn shift(&mut self, track: TrackKind, amount: i32) -> &mut Self {
        if amount != 0 {
            self.steps.push(Step::Shift { track, amount });
        }
        self
    }

    pub fn set_terror(&mut self, space: SpaceId, terror: u32) -> &mut Self {
        self.steps.push(Step::SetTerror { space, terror });
        self
    }

    pub fn set_alignment(&mut self, space: SpaceId, alignment: Alignment) -> &mut Self {
        self.steps.push(Step::SetAlignment { space, alignment });
        self
    }

    pub fn extort(&mut self, space: SpaceId) -> &mut Self {
        self.steps.push(Step::Extort { space });
        self
    }

    pub fn agitate(&mut self, space: SpaceId, terror: u32, shift: bool) -> &mut Self {
        self.steps.push(Step::Agitate { space, terror, shift });
        self
    }

    /// Collapse the control annotations of each space into its last one.
    ///
    /// The surviving annotation starts from the control the space had before
    /// the first change and is dropped when the net change is none.
    pub fn sanitize(&mut self) {
        let mut first: FxHashMap<SpaceId, Control> = FxHashMap::default();
        let mut last: FxHashMap<SpaceId, (usize, bool)> = FxHashMap::default();

        for (i, step) in self.steps.iter().enumerate() {
            if let Step::Transfer {
                src,
                dst,
                src_control,
                dst_control,
                ..
            } = step
            {
                for (location, change, is_dst) in [(src, src_control, false), (dst, dst_control, true)] {
                    if let (Location::Space(id), Some(change)) = (location, change) {
                        first.entry(*id).or_insert(change.from);
                        last.insert(*id, (i, is_dst));
                    }
                }
            }
        }

        for (i, step) in self.steps.iter_mut().enumerate() {
            if let Step::Transfer {
                src,
                dst,
                src_control,
                dst_control,
                ..
            } = step
            {
                for (location, change, is_dst) in [(*src, src_control, false), (*dst, dst_control, true)] {
                    let Location::Space(id) = location else {
                        continue;
                    };
                    let Some(current) = change.as_mut() else {
                        continue;
                    };
                    if last.get(&id) != Some(&(i, is_dst)) {
                        *change = None;
                        continue;
                    }
                    if let Some(from) = first.get(&id) {
                        current.from = *from;
                    }
                    if current.from == current.to {
                        *change = None;
                    }
                }
            }
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in {} (cost {}, {} steps)", self.kind, self.target, self.cost, self.steps.len())
    }
}
