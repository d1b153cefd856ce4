//! Deterministic random number generation for dice and tie-breaks.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Single source**: The bot threads one `GameRng` through every decision
//! - **Injectable dice**: Tests queue exact die results with [`GameRng::load_dice`]
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use colonial_twilight::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.d6();
//! assert!((1..=6).contains(&roll));
//!
//! // Forced rolls are consumed first, in order
//! rng.load_dice(&[1, 6]);
//! assert_eq!(rng.d6(), 1);
//! assert_eq!(rng.d6(), 6);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Deterministic RNG for die rolls and random tie-breaks.
///
/// Uses ChaCha8 for speed while keeping sequences reproducible from a seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    loaded: VecDeque<u8>,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            loaded: VecDeque::new(),
        }
    }

    /// Queue die results returned by the next calls to [`GameRng::d6`].
    ///
    /// Values are clamped to 1..=6.
    pub fn load_dice(&mut self, rolls: &[u8]) {
        self.loaded.extend(rolls.iter().map(|r| (*r).clamp(1, 6)));
    }

    /// Roll a six-sided die.
    pub fn d6(&mut self) -> u8 {
        match self.loaded.pop_front() {
            Some(roll) => roll,
            None => self.inner.gen_range(1..=6),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    ///
    /// Queued dice are not part of the state.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            loaded: VecDeque::new(),
        }
    }
}

/// Serializable RNG state for replay.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.d6(), rng2.d6());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..40).map(|_| rng1.d6()).collect();
        let seq2: Vec<_> = (0..40).map(|_| rng2.d6()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_d6_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..200 {
            let roll = rng.d6();
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_loaded_dice_come_first() {
        let mut rng = GameRng::new(7);
        rng.load_dice(&[3, 9, 0]);

        assert_eq!(rng.d6(), 3);
        assert_eq!(rng.d6(), 6);
        assert_eq!(rng.d6(), 1);
    }

    #[test]
    fn test_loaded_dice_do_not_advance_stream() {
        let mut plain = GameRng::new(11);
        let mut loaded = GameRng::new(11);
        loaded.load_dice(&[2]);

        assert_eq!(loaded.d6(), 2);
        assert_eq!(plain.d6(), loaded.d6());
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.d6();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.d6()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.d6()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
