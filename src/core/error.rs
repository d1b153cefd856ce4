//! Fatal rule violations.
//!
//! Every illegal state transition in the engine surfaces as a [`RulesError`].
//! These are logic errors in the calling decision layer: nothing in the crate
//! retries or repairs them. Bounded game values (resources, commitment) never
//! produce errors, they saturate instead.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RulesError>;

/// A violated game rule or engine invariant.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("unknown space: {0}")]
    UnknownSpace(String),

    #[error("{kind} cannot be held in {holder}")]
    PieceNotAllowed { kind: String, holder: String },

    #[error("not enough {kind} in {holder}: {have} present, {need} required")]
    NotEnoughPieces {
        kind: String,
        holder: String,
        have: u32,
        need: u32,
    },

    #[error("too many bases in {space}: {bases} + {adding} exceeds {max}")]
    TooManyBases {
        space: String,
        bases: u32,
        adding: u32,
        max: u32,
    },

    #[error("{track} out of range: {value} not in [0, {max}]")]
    TrackOutOfRange { track: String, value: i32, max: i32 },

    #[error("{space} is already at {alignment}")]
    AlignmentAtExtreme { space: String, alignment: String },

    #[error("cannot resettle {space}: {reason}")]
    IllegalResettle { space: String, reason: &'static str },

    #[error("terror in {space} cannot go below zero")]
    NegativeTerror { space: String },

    #[error("{0} is not a country")]
    NotACountry(String),

    #[error("illegal {attempted} during {current}")]
    OperationConflict { attempted: String, current: String },

    #[error("illegal {attempted} during {current}")]
    SpecialActivityConflict { attempted: String, current: String },

    #[error("illegal {0} in limited operation")]
    LimitedOperation(String),

    #[error("{target} already selected for {kind}")]
    AlreadySelected { target: String, kind: String },

    #[error("cannot agitate in {0}: not selected for rally")]
    AgitateWithoutRally(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("{conducted} conducted but only {allowed} allowed")]
    ActionNotAllowed { conducted: String, allowed: String },

    #[error("card {0} is out of range [1; 71]")]
    UnknownCard(u8),

    #[error("card {0} has already been drawn")]
    CardAlreadyDrawn(u8),
}

impl RulesError {
    /// Attach the name of the space a piece-accounting failure happened in.
    #[must_use]
    pub fn located(self, space: &str) -> Self {
        match self {
            RulesError::PieceNotAllowed { kind, .. } => RulesError::PieceNotAllowed {
                kind,
                holder: space.into(),
            },
            RulesError::NotEnoughPieces { kind, have, need, .. } => RulesError::NotEnoughPieces {
                kind,
                holder: space.into(),
                have,
                need,
            },
            RulesError::TooManyBases { bases, adding, max, .. } => RulesError::TooManyBases {
                space: space.into(),
                bases,
                adding,
                max,
            },
            other => other,
        }
    }
}
