//! Bounded scalar tracks.
//!
//! Resources, commitment and the victory margins saturate at their bounds.
//! The France track and the border zone track are ordinal progressions: a
//! shift past either end is a logic error and fails.

use serde::{Deserialize, Serialize};

use crate::core::{Result, RulesError};

/// The seven tracks around the map edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    FlnResources,
    GovResources,
    Commitment,
    SupportCommitment,
    OppositionBases,
    France,
    BorderZone,
}

impl TrackKind {
    /// All tracks.
    pub const ALL: [TrackKind; 7] = [
        TrackKind::FlnResources,
        TrackKind::GovResources,
        TrackKind::Commitment,
        TrackKind::SupportCommitment,
        TrackKind::OppositionBases,
        TrackKind::France,
        TrackKind::BorderZone,
    ];

    /// Upper bound and overflow policy of this track.
    #[must_use]
    pub const fn limits(self) -> (i32, Bound) {
        match self {
            TrackKind::France => (5, Bound::Hard),
            TrackKind::BorderZone => (4, Bound::Hard),
            _ => (50, Bound::Clamped),
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrackKind::FlnResources => "FLN resources",
            TrackKind::GovResources => "GOV resources",
            TrackKind::Commitment => "commitment",
            TrackKind::SupportCommitment => "support + commitment",
            TrackKind::OppositionBases => "opposition + bases",
            TrackKind::France => "France track",
            TrackKind::BorderZone => "border zone track",
        };
        f.write_str(name)
    }
}

/// What happens when a shift leaves `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    /// Saturate at the bound.
    Clamped,
    /// Fail the shift.
    Hard,
}

/// A counter on `[0, max]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    kind: TrackKind,
    value: i32,
}

impl Track {
    /// A track at zero.
    #[must_use]
    pub fn new(kind: TrackKind) -> Self {
        Self { kind, value: 0 }
    }

    #[must_use]
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.kind.limits().0
    }

    /// Shift by `delta` under the track's bound policy, returning the new value.
    pub fn shift(&mut self, delta: i32) -> Result<i32> {
        let (max, bound) = self.kind.limits();
        let next = self.value.saturating_add(delta);
        self.value = match bound {
            Bound::Clamped => next.clamp(0, max),
            Bound::Hard if (0..=max).contains(&next) => next,
            Bound::Hard => {
                return Err(RulesError::TrackOutOfRange {
                    track: self.kind.to_string(),
                    value: next,
                    max,
                })
            }
        };
        Ok(self.value)
    }

    /// Set an absolute value, subject to the same bound policy.
    pub fn set(&mut self, value: i32) -> Result<i32> {
        self.shift(value - self.value)
    }

    /// Letter of the France track box, `A` to `F`.
    #[must_use]
    pub fn letter(&self) -> char {
        (b'A' + self.value.clamp(0, 25) as u8) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_track_saturates() {
        let mut track = Track::new(TrackKind::FlnResources);
        assert_eq!(track.shift(-3).unwrap(), 0);
        assert_eq!(track.shift(49).unwrap(), 49);
        assert_eq!(track.shift(10).unwrap(), 50);
        assert_eq!(track.max(), 50);
    }

    #[test]
    fn test_hard_track_fails_out_of_range() {
        let mut track = Track::new(TrackKind::France);
        assert_eq!(track.shift(5).unwrap(), 5);
        assert_eq!(track.letter(), 'F');

        let err = track.shift(1).unwrap_err();
        assert!(matches!(err, RulesError::TrackOutOfRange { value: 6, max: 5, .. }));
        assert_eq!(track.value(), 5);

        let mut border = Track::new(TrackKind::BorderZone);
        assert!(border.shift(-1).is_err());
        assert_eq!(border.set(4).unwrap(), 4);
        assert!(border.shift(1).is_err());
    }

    #[test]
    fn test_france_letters() {
        let mut track = Track::new(TrackKind::France);
        assert_eq!(track.letter(), 'A');
        track.set(4).unwrap();
        assert_eq!(track.letter(), 'E');
    }
}
