//! Everything a decision routine may touch during a half-round.
//!
//! [`GameContext`] bundles the board, the single RNG, the Turn under
//! construction, the options and the current card. Decision code builds an
//! Action through `ctx.turn`, then calls [`GameContext::commit`] to replay
//! it against the board and pay for it.
//!
//! ## Rollback
//!
//! A routine that may end without doing anything takes a
//! [`GameContext::checkpoint`] first and hands it back to
//! [`GameContext::restore`] when it reports `false`. Board and Turn go back;
//! the RNG keeps advancing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, BoardSnapshot, TrackKind};
use crate::cards::Card;
use crate::core::{GameOptions, GameRng, GameRngState, Result};
use crate::turn::{Action, Turn};

/// Saved board and turn, see [`GameContext::checkpoint`].
#[derive(Clone, Debug)]
pub struct Checkpoint {
    board: Board,
    turn: Turn,
}

/// Structural dump of a context for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub board: BoardSnapshot,
    pub rng: GameRngState,
    pub actions: Vec<Action>,
}

/// Explicit game state handed to every decision function.
#[derive(Clone, Debug)]
pub struct GameContext {
    pub board: Board,
    pub rng: GameRng,
    pub turn: Turn,
    pub options: GameOptions,
    /// Card in play, `None` once its Event can no longer be chosen.
    pub card: Option<Card>,
}

impl GameContext {
    /// Load the scenario named by `options` and seed the RNG.
    pub fn new(options: GameOptions) -> Result<Self> {
        let board = Board::load(options.scenario)?;
        Ok(Self::with_board(board, options))
    }

    /// Wrap an existing board.
    #[must_use]
    pub fn with_board(board: Board, options: GameOptions) -> Self {
        Self {
            board,
            rng: GameRng::new(options.seed),
            turn: Turn::default(),
            options,
            card: None,
        }
    }

    /// Start a new half-round.
    pub fn begin_turn(&mut self, limited_op_only: bool) {
        self.turn.reset(limited_op_only);
    }

    /// Apply the most recent Action to the board and charge its cost to
    /// the FLN resources.
    pub fn commit(&mut self) -> Result<()> {
        let Some(action) = self.turn.last_mut() else {
            return Ok(());
        };
        self.board.apply(action)?;
        let resources = self.board.shift_track(TrackKind::FlnResources, -action.cost())?;
        action.set_resources(resources);
        debug!(%action, resources, "action committed");
        Ok(())
    }

    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            board: self.board.clone(),
            turn: self.turn.clone(),
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.board = checkpoint.board;
        self.turn = checkpoint.turn;
    }

    #[must_use]
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            board: self.board.snapshot(),
            rng: self.rng.state(),
            actions: self.turn.actions().iter().cloned().collect(),
        }
    }
}
