use pacman_agents::{Agent, DecisionAgent, RandomAgent};
use pacman_core::{GameState, PacmanState, PACMAN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    /// Move limit reached first
    Timeout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub score: i32,
    /// Pacman moves played
    pub moves: u32,
    /// Successors generated by pacman's searches
    pub nodes: u64,
}

/// Plays one game: pacman searches, each ghost moves at random.
/// `on_round` sees the state after every full round.
pub fn play<F>(
    initial: PacmanState,
    pacman: &mut DecisionAgent<PacmanState>,
    ghosts: &mut [RandomAgent],
    max_moves: u32,
    mut on_round: F,
) -> GameRecord
where
    F: FnMut(&PacmanState),
{
    let mut state = initial;
    let mut moves = 0;
    let mut nodes = 0;

    while !state.is_terminal() && moves < max_moves {
        let result = pacman.search(&state);
        nodes += result.nodes;
        match result.best_action {
            Some(action) => state = state.successor(PACMAN, action),
            None => break,
        }
        moves += 1;

        for ghost in ghosts.iter_mut() {
            if state.is_terminal() {
                break;
            }
            if let Some(action) = ghost.select_action(&state) {
                state = state.successor(ghost.index(), action);
            }
        }
        on_round(&state);
    }

    let outcome = if state.is_win() {
        Outcome::Win
    } else if state.is_lose() {
        Outcome::Loss
    } else {
        Outcome::Timeout
    };

    GameRecord {
        outcome,
        score: state.score,
        moves,
        nodes,
    }
}

/// One random controller per ghost, seeded from `seed` when given.
pub fn ghost_agents(state: &PacmanState, seed: Option<u64>) -> Vec<RandomAgent> {
    (1..state.agent_count().get())
        .map(|index| match seed {
            Some(seed) => RandomAgent::with_seed(index, seed.wrapping_add(index as u64)),
            None => RandomAgent::new(index),
        })
        .collect()
}
