use crate::Agent;
use pacman_core::GameState;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks uniformly among the legal actions of one agent. Drives the ghosts.
pub struct RandomAgent {
    index: usize,
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(index: usize) -> Self {
        RandomAgent {
            index,
            name: format!("Random({})", index),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(index: usize, seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(index)
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<S: GameState> Agent<S> for RandomAgent {
    fn select_action(&mut self, state: &S) -> Option<S::Action> {
        state.legal_actions(self.index).choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
