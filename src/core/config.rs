//! Game options.
//!
//! `GameOptions` bundles everything a game or a bot decision needs beyond
//! the board itself: the RNG seed, the scenario to load and the knobs of the
//! bot's Rally budget. It is plain serde data so a front-end can read it from
//! JSON.

use serde::{Deserialize, Serialize};

/// Scenario setups from the playbook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// "Short: 1960-1962", the only fully defined setup.
    #[default]
    Short,
    /// "Medium: 1957-1962".
    Medium,
    /// "Full: 1955-1962".
    Full,
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::Short => write!(f, "short"),
            Scenario::Medium => write!(f, "medium"),
            Scenario::Full => write!(f, "full"),
        }
    }
}

/// Game and bot configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Random seed for dice and tie-breaks.
    /// Same seed produces the same decisions on the same board.
    pub seed: u64,

    /// Scenario loaded at setup.
    pub scenario: Scenario,

    /// Most spaces the bot selects for a full Rally.
    pub max_rally_spaces: usize,

    /// At or below this many resources the bot may spend them all on one
    /// operation; above it, only two thirds.
    pub full_spend_threshold: i32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            scenario: Scenario::Short,
            max_rally_spaces: 6,
            full_spend_threshold: 8,
        }
    }
}

impl GameOptions {
    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the scenario.
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Set the Rally space cap.
    pub fn with_max_rally_spaces(mut self, spaces: usize) -> Self {
        self.max_rally_spaces = spaces;
        self
    }

    /// Set the full-spend resource threshold.
    pub fn with_full_spend_threshold(mut self, resources: i32) -> Self {
        self.full_spend_threshold = resources;
        self
    }

    /// Resources an operation may consume out of `resources`.
    #[must_use]
    pub fn spend_cap(&self, resources: i32) -> i32 {
        if resources <= self.full_spend_threshold {
            resources
        } else {
            resources * 2 / 3
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GameOptions::default();
        assert_eq!(options.seed, 42);
        assert_eq!(options.scenario, Scenario::Short);
        assert_eq!(options.max_rally_spaces, 6);
        assert_eq!(options.full_spend_threshold, 8);
    }

    #[test]
    fn test_builder_pattern() {
        let options = GameOptions::default()
            .with_seed(123)
            .with_scenario(Scenario::Full)
            .with_max_rally_spaces(3);

        assert_eq!(options.seed, 123);
        assert_eq!(options.scenario, Scenario::Full);
        assert_eq!(options.max_rally_spaces, 3);
    }

    #[test]
    fn test_spend_cap() {
        let options = GameOptions::default();
        assert_eq!(options.spend_cap(0), 0);
        assert_eq!(options.spend_cap(8), 8);
        assert_eq!(options.spend_cap(9), 6);
        assert_eq!(options.spend_cap(20), 13);
    }

    #[test]
    fn test_serialization() {
        let options = GameOptions::default().with_seed(7);
        let json = serde_json::to_string(&options).unwrap();
        let deserialized: GameOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, deserialized);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: GameOptions = serde_json::from_str(r#"{"seed": 9, "scenario": "short"}"#).unwrap();
        assert_eq!(options.seed, 9);
        assert_eq!(options.max_rally_spaces, 6);
    }
}
