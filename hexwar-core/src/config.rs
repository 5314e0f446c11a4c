//! Search and game configuration

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::eval::Heuristics;

/// Configuration for the alpha-beta search agent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below each root move
    pub depth: u32,
    /// Moves explored per node below the root, in scan order
    pub branching_cap: usize,
    /// Evaluation weights
    pub heuristics: Heuristics,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            branching_cap: 7,
            heuristics: Heuristics::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_branching_cap(mut self, cap: usize) -> Self {
        self.branching_cap = cap;
        self
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search config: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse search config: {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        if config.branching_cap == 0 {
            anyhow::bail!("branching_cap must be at least 1");
        }
        Ok(config)
    }
}

/// Configuration for one game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Board side N
    pub size: u8,
    /// Cumulative thinking time allowed per agent (None = unlimited)
    pub time_budget: Option<Duration>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 9,
            time_budget: None,
        }
    }
}

impl GameConfig {
    pub fn new(size: u8) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_config() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 3);
        assert_eq!(config.branching_cap, 7);
        assert_eq!(config.heuristics, Heuristics::default());
    }

    #[test]
    fn test_partial_json() {
        let config = SearchConfig::from_json(r#"{"depth": 2, "heuristics": {"edge_weight": 3.0}}"#).unwrap();
        assert_eq!(config.depth, 2);
        assert_eq!(config.branching_cap, 7);
        assert_eq!(config.heuristics.edge_weight, 3.0);
        assert_eq!(config.heuristics.group_weight, 1.0);
    }

    #[test]
    fn test_rejects_zero_branching_cap() {
        assert!(SearchConfig::from_json(r#"{"branching_cap": 0}"#).is_err());
        assert!(SearchConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SearchConfig::load(Path::new("/nonexistent/hexwar-search.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read search config"));
    }

    #[test]
    fn test_builders() {
        let config = SearchConfig::default().with_depth(1).with_branching_cap(4);
        assert_eq!((config.depth, config.branching_cap), (1, 4));

        let game = GameConfig::new(11).with_time_budget(Duration::from_secs(92));
        assert_eq!(game.size, 11);
        assert_eq!(game.time_budget, Some(Duration::from_secs(92)));
    }
}
