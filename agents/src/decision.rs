use crate::config::{AgentConfig, Strategy};
use crate::error::{Error, Result};
use crate::evaluation::{Evaluation, EvaluationRegistry};
use crate::reflex::{reflex, reflex_evaluation};
use crate::search::{alpha_beta, expectimax, minimax, SearchResult};
use crate::Agent;
use log::debug;
use pacman_core::{Direction, GameState, PacmanView};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Agent 0 controller: runs the configured strategy from every state it is given.
pub struct DecisionAgent<S: GameState> {
    name: String,
    strategy: Strategy,
    depth: u32,
    evaluate: Evaluation<S>,
    reflex_evaluate: Option<fn(&S, S::Action) -> f64>,
    rng: StdRng,
}

impl<S: GameState> DecisionAgent<S> {
    /// Fails when `depth` is zero.
    pub fn new(strategy: Strategy, depth: u32, evaluate: Evaluation<S>) -> Result<Self> {
        if depth == 0 {
            return Err(Error::InvalidDepth { depth });
        }

        let name = match strategy {
            Strategy::Reflex => strategy.to_string(),
            _ => format!("{}(depth={})", strategy, depth),
        };

        Ok(DecisionAgent {
            name,
            strategy,
            depth,
            evaluate,
            reflex_evaluate: None,
            rng: StdRng::from_entropy(),
        })
    }

    /// Builds an agent from `config`, resolving its evaluation by name.
    pub fn with_registry(config: &AgentConfig, registry: &EvaluationRegistry<S>) -> Result<Self> {
        let evaluate = registry.resolve(&config.evaluation)?;
        let agent = Self::new(config.strategy, config.depth, evaluate)?;
        Ok(match config.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        })
    }

    /// Makes reflex tie-breaking reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Scores reflex candidates with `score` instead of the cutoff evaluation.
    pub fn with_reflex_evaluation(mut self, score: fn(&S, S::Action) -> f64) -> Self {
        self.reflex_evaluate = Some(score);
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn evaluation(&self) -> Evaluation<S> {
        self.evaluate
    }

    /// Searches from `state` with agent 0 to move.
    pub fn search(&mut self, state: &S) -> SearchResult<S::Action> {
        let result = match self.strategy {
            Strategy::Reflex => match self.reflex_evaluate {
                Some(score) => reflex(state, score, &mut self.rng),
                None => {
                    let evaluate = self.evaluate;
                    reflex(state, |successor: &S, _| evaluate(successor), &mut self.rng)
                }
            },
            Strategy::Minimax => minimax(state, self.depth, self.evaluate),
            Strategy::AlphaBeta => alpha_beta(state, self.depth, self.evaluate),
            Strategy::Expectimax => expectimax(state, self.depth, self.evaluate),
        };

        debug!(
            "{}: action={:?} value={:.2} nodes={}",
            self.name, result.best_action, result.value, result.nodes
        );
        result
    }
}

impl<S> DecisionAgent<S>
where
    S: GameState<Action = Direction> + PacmanView,
{
    /// Builds a Pacman agent with the built-in evaluations and reflex scoring.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let registry = EvaluationRegistry::builtin();
        Ok(Self::with_registry(config, &registry)?.with_reflex_evaluation(reflex_evaluation::<S>))
    }
}

impl<S: GameState> Agent<S> for DecisionAgent<S> {
    fn select_action(&mut self, state: &S) -> Option<S::Action> {
        self.search(state).best_action
    }

    fn name(&self) -> &str {
        &self.name
    }
}
