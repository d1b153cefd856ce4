//! Structural board snapshots for replay and debugging.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::forces::{Available, Casualties, OutOfPlay};
use super::space::Space;
use super::track::Track;
use crate::core::{Result, RulesError};

/// Everything needed to rebuild a [`Board`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub spaces: Vec<Space>,
    pub available: Available,
    pub casualties: Casualties,
    pub out_of_play: OutOfPlay,
    pub tracks: Vec<Track>,
    pub capabilities: Vec<u8>,
}

impl BoardSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl Board {
    /// Capture the full board state.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            spaces: self.spaces().to_vec(),
            available: self.available().clone(),
            casualties: self.casualties().clone(),
            out_of_play: self.out_of_play().clone(),
            tracks: self.tracks().to_vec(),
            capabilities: self.capabilities().to_vec(),
        }
    }

    /// Rebuild a board from a snapshot.
    ///
    /// Fails when the snapshot does not list exactly one entry per track.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self> {
        let count = snapshot.tracks.len();
        let tracks: [Track; 7] = snapshot.tracks.try_into().map_err(|_| RulesError::TrackOutOfRange {
            track: "track list".into(),
            value: count as i32,
            max: 7,
        })?;
        Ok(Self::from_parts(
            snapshot.spaces,
            snapshot.available,
            snapshot.casualties,
            snapshot.out_of_play,
            tracks,
            snapshot.capabilities,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Scenario;

    #[test]
    fn test_snapshot_restores_board() {
        let board = Board::load(Scenario::Short).unwrap();
        let snapshot = board.snapshot();

        let bytes = snapshot.to_bytes().unwrap();
        let decoded = BoardSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, snapshot);

        let restored = Board::from_snapshot(decoded).unwrap();
        assert_eq!(restored.fln_resources(), 15);
        assert_eq!(restored.by_name("Tunisia").unwrap().fln_underground(), 5);
        assert!(restored.by_name("Morocco").unwrap().independent());
    }

    #[test]
    fn test_snapshot_json() {
        let board = Board::load(Scenario::Short).unwrap();
        let json = serde_json::to_string(&board.snapshot()).unwrap();
        assert!(json.contains("Souk Ahras"));
    }

    #[test]
    fn test_truncated_tracks_rejected() {
        let mut snapshot = Board::new().snapshot();
        snapshot.tracks.pop();
        assert!(Board::from_snapshot(snapshot).is_err());
    }
}
