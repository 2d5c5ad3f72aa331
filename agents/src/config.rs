use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default search horizon, in rounds.
pub const DEFAULT_DEPTH: u32 = 2;
/// Evaluation used when none is configured.
pub const DEFAULT_EVALUATION: &str = "better";

/// How the controlled agent picks its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One-ply lookahead scored by the reflex heuristic
    Reflex,
    /// Adversaries minimise
    #[default]
    Minimax,
    /// Minimax with alpha-beta pruning
    AlphaBeta,
    /// Adversaries move uniformly at random
    Expectimax,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Reflex,
        Strategy::Minimax,
        Strategy::AlphaBeta,
        Strategy::Expectimax,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Reflex => "reflex",
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alpha-beta",
            Strategy::Expectimax => "expectimax",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "reflex" => Ok(Strategy::Reflex),
            "minimax" => Ok(Strategy::Minimax),
            "alpha-beta" | "alphabeta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err(Error::UnknownStrategy {
                input: s.to_string(),
                expected: Strategy::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

/// Settings for a decision agent. Immutable once the agent is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    pub strategy: Strategy,
    /// Registry name of the cutoff evaluation
    pub evaluation: String,
    /// Search horizon in full rounds
    pub depth: u32,
    /// Seed for reflex tie-breaking; entropy when absent
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            evaluation: DEFAULT_EVALUATION.to_string(),
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_evaluation(mut self, name: impl Into<String>) -> Self {
        self.evaluation = name.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
