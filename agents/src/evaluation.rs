use crate::error::{Error, Result};
use pacman_core::{GameState, PacmanView};
use std::collections::BTreeMap;

/// Static scoring of a state, used at search cutoffs. Higher is better for agent 0.
pub type Evaluation<S> = fn(&S) -> f64;

/// Penalty when a dangerous ghost is one step away.
pub const DANGER_PENALTY: f64 = 400.0;
/// Numerator of the inverse-distance ghost penalty.
pub const GHOST_WEIGHT: f64 = 10.0;
/// Numerator of the inverse-distance food bonus.
pub const FOOD_WEIGHT: f64 = 10.0;
/// Numerator of the bonus for chasing a harmless ghost.
pub const SCARED_GHOST_WEIGHT: f64 = 200.0;
/// Cost of each capsule left on the board.
pub const CAPSULE_PENALTY: f64 = 20.0;

/// Returns the environment score unchanged.
pub fn score_evaluation<S: GameState>(state: &S) -> f64 {
    state.score()
}

/// Composite heuristic: score, food attraction, ghost avoidance or chase,
/// and a cost for unused capsules.
/// Returns negative infinity when a dangerous ghost shares the agent's cell.
pub fn better_evaluation<S: GameState + PacmanView>(state: &S) -> f64 {
    let pos = state.pacman_position();
    let ghosts = state.ghosts();
    let mut score = state.score();

    let closest_danger = ghosts
        .iter()
        .filter(|g| !g.is_scared())
        .map(|g| pos.manhattan_distance(g.position))
        .min();

    if closest_danger == Some(0) {
        return f64::NEG_INFINITY;
    }

    if ghosts.iter().any(|g| g.is_scared()) {
        for ghost in ghosts.iter().filter(|g| g.is_scared()) {
            let distance = pos.manhattan_distance(ghost.position);
            // Only chase ghosts that can be reached before they recover
            if distance <= ghost.scared_timer {
                score += SCARED_GHOST_WEIGHT / f64::from(distance + 1);
            }
        }
    } else if let Some(distance) = closest_danger {
        if distance < 2 {
            score -= DANGER_PENALTY;
        }
        score -= GHOST_WEIGHT / f64::from(distance);
    }

    if let Some(distance) = state
        .food()
        .iter()
        .map(|&f| pos.manhattan_distance(f))
        .min()
    {
        score += FOOD_WEIGHT / f64::from(distance.max(1));
    }

    score -= CAPSULE_PENALTY * state.capsules().len() as f64;

    score
}

/// Maps stable names to evaluation functions.
/// Names are resolved once, when an agent is built.
pub struct EvaluationRegistry<S> {
    entries: BTreeMap<&'static str, Evaluation<S>>,
}

impl<S: GameState> EvaluationRegistry<S> {
    /// Creates a registry holding the state-agnostic evaluations.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: BTreeMap::new(),
        };
        registry.register("score", score_evaluation::<S>);
        registry.register("score_evaluation_function", score_evaluation::<S>);
        registry
    }

    /// Adds or replaces an entry, returning the replaced function.
    pub fn register(
        &mut self,
        name: &'static str,
        evaluate: Evaluation<S>,
    ) -> Option<Evaluation<S>> {
        self.entries.insert(name, evaluate)
    }

    pub fn resolve(&self, name: &str) -> Result<Evaluation<S>> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownEvaluation {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl<S: GameState + PacmanView> EvaluationRegistry<S> {
    /// Registry with every built-in evaluation.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("better", better_evaluation::<S>);
        registry.register("better_evaluation_function", better_evaluation::<S>);
        registry
    }
}

impl<S: GameState> Default for EvaluationRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
