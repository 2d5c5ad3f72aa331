pub mod config;
pub mod decision;
pub mod error;
pub mod evaluation;
pub mod random;
pub mod reflex;
pub mod search;

#[cfg(test)]
mod testing;

use pacman_core::GameState;

/// Core trait for anything that picks moves in a multi-agent game
pub trait Agent<S: GameState> {
    /// Choose an action for the agent this controller drives, or `None` when it has none
    fn select_action(&mut self, state: &S) -> Option<S::Action>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use config::{AgentConfig, Strategy, DEFAULT_DEPTH, DEFAULT_EVALUATION};
pub use decision::DecisionAgent;
pub use error::{Error, Result};
pub use evaluation::{better_evaluation, score_evaluation, Evaluation, EvaluationRegistry};
pub use random::RandomAgent;
pub use reflex::{best_actions, reflex, reflex_evaluation};
pub use search::{alpha_beta, expectimax, minimax, SearchResult};
