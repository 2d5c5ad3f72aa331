use crate::state::{next_turn, GameState};

/// Game-tree counts for a search horizon measured in rounds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResults {
    /// Leaves of the tree: cutoff, terminal or action-less states
    pub nodes: u64,
    pub wins: u64,
    pub losses: u64,
    /// Successor states generated to reach the leaves
    pub successors: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.wins += other.wins;
        self.losses += other.losses;
        self.successors += other.successors;
    }
}

/// Counts the leaves of the full game tree, `rounds` deep.
pub fn perft<S: GameState>(state: &S, rounds: u32) -> u64 {
    perft_detailed(state, rounds).nodes
}

/// Counts leaves below each of the controlled agent's actions.
pub fn perft_divide<S: GameState>(state: &S, rounds: u32) -> Vec<(S::Action, u64)> {
    if rounds == 0 || state.is_terminal() {
        return Vec::new();
    }

    let (agent, depth) = next_turn(0, rounds, state.agent_count());
    state
        .legal_actions(0)
        .into_iter()
        .map(|action| {
            let new_state = state.successor(0, action);
            (action, count(&new_state, depth, agent).nodes)
        })
        .collect()
}

/// Performs perft with outcome statistics.
pub fn perft_detailed<S: GameState>(state: &S, rounds: u32) -> PerftResults {
    count(state, rounds, 0)
}

fn count<S: GameState>(state: &S, depth: u32, agent: usize) -> PerftResults {
    let mut results = PerftResults::default();

    let actions = if depth == 0 || state.is_terminal() {
        Vec::new()
    } else {
        state.legal_actions(agent)
    };

    if actions.is_empty() {
        results.nodes = 1;
        results.wins = u64::from(state.is_win());
        results.losses = u64::from(state.is_lose());
        return results;
    }

    let (next_agent, next_depth) = next_turn(agent, depth, state.agent_count());
    for action in actions {
        let new_state = state.successor(agent, action);
        results.successors += 1;
        results.add(&count(&new_state, next_depth, next_agent));
    }

    results
}
