use crate::search::SearchResult;
use pacman_core::{Direction, GameState, PacmanView};
use rand::seq::SliceRandom;
use rand::Rng;

/// Score returned when a dangerous ghost shares the agent's cell.
pub const COLLISION_SCORE: f64 = -999_999.0;
/// Score returned when a dangerous ghost is one step away.
pub const ADJACENT_GHOST_SCORE: f64 = -400.0;
/// Numerator of the inverse-distance ghost penalty.
pub const GHOST_WEIGHT: f64 = 10.0;
/// Numerator of the inverse-distance food bonus.
pub const FOOD_WEIGHT: f64 = 10.0;
/// Cost of choosing `Stop`.
pub const STOP_PENALTY: f64 = 100.0;

/// Scores the state reached by `action`, looking only at that state.
pub fn reflex_evaluation<S: GameState + PacmanView>(successor: &S, action: Direction) -> f64 {
    let pos = successor.pacman_position();
    let mut score = successor.score();

    let closest_ghost = successor
        .ghosts()
        .iter()
        .filter(|g| !g.is_scared())
        .map(|g| pos.manhattan_distance(g.position))
        .min();

    match closest_ghost {
        Some(0) => return COLLISION_SCORE,
        Some(1) => return ADJACENT_GHOST_SCORE,
        Some(distance) => score -= GHOST_WEIGHT / f64::from(distance),
        None => {}
    }

    if let Some(distance) = successor
        .food()
        .iter()
        .map(|&f| pos.manhattan_distance(f))
        .min()
    {
        score += FOOD_WEIGHT / f64::from(distance.max(1));
    }

    if action == Direction::Stop {
        score -= STOP_PENALTY;
    }

    score
}

/// Scores every legal action of agent 0 one ply ahead.
/// Returns the actions sharing the best score, in legal-action order.
pub fn best_actions<S, F>(state: &S, score: F) -> (Vec<S::Action>, f64)
where
    S: GameState,
    F: Fn(&S, S::Action) -> f64,
{
    let scored: Vec<(S::Action, f64)> = state
        .legal_actions(0)
        .into_iter()
        .map(|action| (action, score(&state.successor(0, action), action)))
        .collect();

    let best = scored
        .iter()
        .map(|&(_, v)| v)
        .fold(f64::NEG_INFINITY, f64::max);

    let actions = scored
        .iter()
        .filter(|&&(_, v)| v == best)
        .map(|&(action, _)| action)
        .collect();

    (actions, best)
}

/// Picks uniformly at random among the best-scoring actions.
/// Without legal actions there is nothing to score: the result carries no
/// action and the raw `state.score()` as its value.
pub fn reflex<S, F, R>(state: &S, score: F, rng: &mut R) -> SearchResult<S::Action>
where
    S: GameState,
    F: Fn(&S, S::Action) -> f64,
    R: Rng + ?Sized,
{
    let nodes = state.legal_actions(0).len() as u64;
    if nodes == 0 {
        return SearchResult {
            best_action: None,
            value: state.score(),
            nodes,
        };
    }

    let (actions, value) = best_actions(state, score);
    SearchResult {
        best_action: actions.choose(rng).copied(),
        value,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacman_core::{Layout, PacmanState};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(text: &str) -> PacmanState {
        Layout::parse(text).unwrap().initial_state()
    }

    #[test]
    fn test_collision_scores() {
        let s = state("%%%%%%\n%P G %\n%%%%%%");
        let toward = s.successor(0, Direction::East);
        assert_eq!(reflex_evaluation(&toward, Direction::East), ADJACENT_GHOST_SCORE);

        let mut caught = toward.clone();
        caught.ghosts[0].position = caught.pacman.position;
        assert_eq!(reflex_evaluation(&caught, Direction::East), COLLISION_SCORE);
    }

    #[test]
    fn test_scared_ghosts_are_ignored() {
        let mut s = state("%%%%%%\n%P G %\n%%%%%%");
        s.ghosts[0].scared_timer = 10;
        let toward = s.successor(0, Direction::East);
        // Score after one move is -1 and there is nothing else to weigh
        assert_eq!(reflex_evaluation(&toward, Direction::East), -1.0);
    }

    #[test]
    fn test_stop_is_penalized() {
        let s = state("%%%%%%%%\n%P     %\n%     G%\n%%%%%%%%");
        let stay = s.successor(0, Direction::Stop);
        let ghost_term = GHOST_WEIGHT / 6.0;
        let expected = -1.0 - ghost_term - STOP_PENALTY;
        assert!((reflex_evaluation(&stay, Direction::Stop) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_food_attraction() {
        let s = state("%%%%%%%%\n%  P  .%\n%G     %\n%%%%%%%%");
        let (actions, _) = best_actions(&s, reflex_evaluation::<PacmanState>);
        assert_eq!(actions, vec![Direction::East]);
    }

    #[test]
    fn test_reflex_picks_from_argmax_set() {
        // Symmetric room: every move gets as close to a pellet
        let s = state("%%%%%%%\n%.   .%\n%  P  %\n%.   .%\n%%%%%%%");
        let (argmax, best) = best_actions(&s, reflex_evaluation::<PacmanState>);
        assert!(argmax.len() > 1);

        let mut rng = StdRng::seed_from_u64(1234);
        let mut seen = Vec::new();
        for _ in 0..1000 {
            let result = reflex(&s, reflex_evaluation::<PacmanState>, &mut rng);
            let action = result.best_action.unwrap();
            assert!(argmax.contains(&action));
            assert_eq!(result.value, best);
            if !seen.contains(&action) {
                seen.push(action);
            }
        }
        // Ties really are broken at random
        assert_eq!(seen.len(), argmax.len());
    }

    #[test]
    fn test_reflex_without_actions() {
        let mut s = state("%%%%%\n%P G%\n%%%%%");
        s.lose = true;
        let mut rng = StdRng::seed_from_u64(0);
        let result = reflex(&s, reflex_evaluation::<PacmanState>, &mut rng);
        assert_eq!(result.best_action, None);
        assert_eq!(result.nodes, 0);
        assert_eq!(result.value, s.score());
    }
}
