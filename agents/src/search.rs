//! Depth-limited adversarial search over multi-agent game trees.
//!
//! Depth counts full rounds: every agent moves once per round, agent 0
//! first. Agent 0 maximises; the others minimise (minimax, alpha-beta) or
//! average over their legal actions (expectimax). A state with no legal
//! actions for the agent to move is scored like a cutoff.

use crate::evaluation::Evaluation;
use pacman_core::{next_turn, GameState};

const INFINITY: f64 = f64::INFINITY;

/// Outcome of a top-level search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    /// `None` when agent 0 has no legal action or the depth is zero
    pub best_action: Option<A>,
    /// Backed-up value of the root
    pub value: f64,
    /// Successor states generated
    pub nodes: u64,
}

impl<A> SearchResult<A> {
    fn leaf(value: f64) -> Self {
        Self {
            best_action: None,
            value,
            nodes: 0,
        }
    }
}

#[derive(Debug, Default)]
struct SearchInfo {
    nodes: u64,
}

impl SearchInfo {
    fn successor<S: GameState>(&mut self, state: &S, agent: usize, action: S::Action) -> S {
        self.nodes += 1;
        state.successor(agent, action)
    }
}

/// Returns the actions of `agent`, or `None` when the state must be scored directly.
fn expandable<S: GameState>(state: &S, depth: u32, agent: usize) -> Option<Vec<S::Action>> {
    if depth == 0 || state.is_terminal() {
        return None;
    }
    let actions = state.legal_actions(agent);
    (!actions.is_empty()).then_some(actions)
}

/// Shared root for minimax and expectimax: first maximum wins.
fn search_root<S, F>(
    state: &S,
    depth: u32,
    evaluate: Evaluation<S>,
    mut value: F,
) -> SearchResult<S::Action>
where
    S: GameState,
    F: FnMut(&S, u32, usize, &mut SearchInfo) -> f64,
{
    let Some(actions) = expandable(state, depth, 0) else {
        return SearchResult::leaf(evaluate(state));
    };

    let mut info = SearchInfo::default();
    let (agent, child_depth) = next_turn(0, depth, state.agent_count());
    let mut best_action = None;
    let mut best_value = -INFINITY;

    for action in actions {
        let child = info.successor(state, 0, action);
        let v = value(&child, child_depth, agent, &mut info);
        if best_action.is_none() || v > best_value {
            best_value = v;
            best_action = Some(action);
        }
    }

    SearchResult {
        best_action,
        value: best_value,
        nodes: info.nodes,
    }
}

/// Minimax search to `depth` rounds.
pub fn minimax<S: GameState>(
    state: &S,
    depth: u32,
    evaluate: Evaluation<S>,
) -> SearchResult<S::Action> {
    search_root(state, depth, evaluate, |child, depth, agent, info| {
        minimax_value(child, depth, agent, evaluate, info)
    })
}

fn minimax_value<S: GameState>(
    state: &S,
    depth: u32,
    agent: usize,
    evaluate: Evaluation<S>,
    info: &mut SearchInfo,
) -> f64 {
    let Some(actions) = expandable(state, depth, agent) else {
        return evaluate(state);
    };

    let (next_agent, next_depth) = next_turn(agent, depth, state.agent_count());
    let values = actions.into_iter().map(|action| {
        let child = info.successor(state, agent, action);
        minimax_value(&child, next_depth, next_agent, evaluate, info)
    });

    if agent == 0 {
        values.fold(-INFINITY, f64::max)
    } else {
        values.fold(INFINITY, f64::min)
    }
}

/// Minimax with alpha-beta pruning. Returns the same value and action as
/// [`minimax`] while generating no more successors.
pub fn alpha_beta<S: GameState>(
    state: &S,
    depth: u32,
    evaluate: Evaluation<S>,
) -> SearchResult<S::Action> {
    let Some(actions) = expandable(state, depth, 0) else {
        return SearchResult::leaf(evaluate(state));
    };

    let mut info = SearchInfo::default();
    let (agent, child_depth) = next_turn(0, depth, state.agent_count());
    let mut alpha = -INFINITY;
    let mut best_action = None;
    let mut best_value = -INFINITY;

    // Beta is unbounded at the root, so only alpha tightens between siblings
    for action in actions {
        let child = info.successor(state, 0, action);
        let v = alpha_beta_value(&child, child_depth, agent, alpha, INFINITY, evaluate, &mut info);
        if best_action.is_none() || v > best_value {
            best_value = v;
            best_action = Some(action);
        }
        alpha = alpha.max(best_value);
    }

    SearchResult {
        best_action,
        value: best_value,
        nodes: info.nodes,
    }
}

#[allow(clippy::too_many_arguments)]
fn alpha_beta_value<S: GameState>(
    state: &S,
    depth: u32,
    agent: usize,
    mut alpha: f64,
    mut beta: f64,
    evaluate: Evaluation<S>,
    info: &mut SearchInfo,
) -> f64 {
    let Some(actions) = expandable(state, depth, agent) else {
        return evaluate(state);
    };

    let (next_agent, next_depth) = next_turn(agent, depth, state.agent_count());

    if agent == 0 {
        let mut best = -INFINITY;
        for action in actions {
            let child = info.successor(state, agent, action);
            let v = alpha_beta_value(&child, next_depth, next_agent, alpha, beta, evaluate, info);
            best = best.max(v);
            if best > beta {
                return best;
            }
            alpha = alpha.max(best);
        }
        best
    } else {
        let mut worst = INFINITY;
        for action in actions {
            let child = info.successor(state, agent, action);
            let v = alpha_beta_value(&child, next_depth, next_agent, alpha, beta, evaluate, info);
            worst = worst.min(v);
            if worst < alpha {
                return worst;
            }
            beta = beta.min(worst);
        }
        worst
    }
}

/// Expectimax search: adversaries pick each legal action with equal probability.
pub fn expectimax<S: GameState>(
    state: &S,
    depth: u32,
    evaluate: Evaluation<S>,
) -> SearchResult<S::Action> {
    search_root(state, depth, evaluate, |child, depth, agent, info| {
        expectimax_value(child, depth, agent, evaluate, info)
    })
}

fn expectimax_value<S: GameState>(
    state: &S,
    depth: u32,
    agent: usize,
    evaluate: Evaluation<S>,
    info: &mut SearchInfo,
) -> f64 {
    let Some(actions) = expandable(state, depth, agent) else {
        return evaluate(state);
    };

    let (next_agent, next_depth) = next_turn(agent, depth, state.agent_count());
    let count = actions.len() as f64;
    let values = actions.into_iter().map(|action| {
        let child = info.successor(state, agent, action);
        expectimax_value(&child, next_depth, next_agent, evaluate, info)
    });

    if agent == 0 {
        values.fold(-INFINITY, f64::max)
    } else {
        values.sum::<f64>() / count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::better_evaluation;
    use crate::testing::{random_tree, tree_value, Tree};
    use pacman_core::{Direction, Layout, PacmanState, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type Search<S> = fn(&S, u32, Evaluation<S>) -> SearchResult<<S as GameState>::Action>;

    fn strategies<S: GameState>() -> [Search<S>; 3] {
        [minimax, alpha_beta, expectimax]
    }

    fn leaves(values: &[f64]) -> Vec<Tree> {
        values.iter().map(|&v| Tree::leaf(v)).collect()
    }

    /// Textbook two-player tree: max over three min nodes.
    fn textbook() -> crate::testing::TreeState {
        Tree::node(vec![
            Tree::node(leaves(&[3.0, 12.0, 8.0])),
            Tree::node(leaves(&[2.0, 4.0, 6.0])),
            Tree::node(leaves(&[14.0, 5.0, 2.0])),
        ])
        .into_state(2)
    }

    #[test]
    fn test_minimax_textbook() {
        let result = minimax(&textbook(), 1, tree_value);
        assert_eq!(result.value, 3.0);
        assert_eq!(result.best_action, Some(0));
        assert_eq!(result.nodes, 12);
    }

    #[test]
    fn test_alpha_beta_textbook_prunes() {
        let result = alpha_beta(&textbook(), 1, tree_value);
        assert_eq!(result.value, 3.0);
        assert_eq!(result.best_action, Some(0));
        // Second min node is cut after its first leaf (2 < 3)
        assert_eq!(result.nodes, 10);
    }

    #[test]
    fn test_expectimax_textbook() {
        let result = expectimax(&textbook(), 1, tree_value);
        // Means: 23/3, 4, 7
        assert!((result.value - 23.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.best_action, Some(0));
    }

    #[test]
    fn test_expectimax_matches_enumeration() {
        // Three controlled actions, one adversary with a fixed action set each
        let outcomes = [vec![1.0, 8.0], vec![4.0, 4.0, 7.0], vec![-3.0, 20.0, 0.0, 1.0]];
        let state =
            Tree::node(outcomes.iter().map(|o| Tree::node(leaves(o))).collect()).into_state(2);

        let expected: Vec<f64> = outcomes
            .iter()
            .map(|o| o.iter().sum::<f64>() / o.len() as f64)
            .collect();
        let best = expected.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_index = expected.iter().position(|&v| v == best).unwrap();

        let result = expectimax(&state, 1, tree_value);
        assert!((result.value - best).abs() < 1e-9);
        assert_eq!(result.best_action, Some(best_index));
    }

    #[test]
    fn test_depth_zero_generates_nothing() {
        let state = textbook();
        for search in strategies() {
            let result = search(&state, 0, tree_value);
            assert_eq!(result.best_action, None);
            assert_eq!(result.nodes, 0);
            assert_eq!(result.value, tree_value(&state));
        }
    }

    #[test]
    fn test_no_legal_actions_is_a_leaf() {
        let state = Tree::leaf(5.0).into_state(2);
        for search in strategies() {
            let result = search(&state, 3, tree_value);
            assert_eq!(result.best_action, None);
            assert_eq!(result.value, 5.0);
            assert_eq!(result.nodes, 0);
        }
    }

    #[test]
    fn test_adversary_without_actions_is_evaluated() {
        // Second child has no adversary moves; its own value is used
        let state = Tree::node(vec![
            Tree::node(leaves(&[1.0, 2.0])),
            Tree::leaf(1.5),
        ])
        .into_state(2);
        assert_eq!(minimax(&state, 1, tree_value).best_action, Some(1));
        assert_eq!(expectimax(&state, 1, tree_value).best_action, Some(0));
        assert_eq!(alpha_beta(&state, 1, tree_value).value, 1.5);
    }

    #[test]
    fn test_single_agent_is_one_ply_max() {
        let state = Tree::node(leaves(&[2.0, 7.0, 7.0, -1.0])).into_state(1);
        let result = minimax(&state, 1, tree_value);
        assert_eq!(result.value, 7.0);
        // Ties go to the first action seen
        assert_eq!(result.best_action, Some(1));
        assert_eq!(result.nodes, 4);
    }

    #[test]
    fn test_multiple_adversaries_per_round() {
        // Three agents, one round: max(min(min(..)))
        let state = Tree::node(vec![
            Tree::node(vec![Tree::node(leaves(&[5.0, 6.0])), Tree::node(leaves(&[7.0, 4.0]))]),
            Tree::node(vec![Tree::node(leaves(&[3.0, 9.0])), Tree::node(leaves(&[8.0, 8.0]))]),
        ])
        .into_state(3);
        assert_eq!(minimax(&state, 1, tree_value).value, 4.0);
        assert_eq!(alpha_beta(&state, 1, tree_value).value, 4.0);
        // (5.5 + 5.5) / 2 versus (6 + 8) / 2
        assert_eq!(expectimax(&state, 1, tree_value).value, 7.0);
        assert_eq!(expectimax(&state, 1, tree_value).best_action, Some(1));
    }

    #[test]
    fn test_cutoff_uses_evaluation() {
        // Depth 1 with two agents stops after the adversary replies,
        // so grandchildren are never generated
        let deep = Tree::node(vec![Tree::node(vec![Tree::node(leaves(&[100.0])).with_value(1.0)])]);
        let result = minimax(&deep.into_state(2), 1, tree_value);
        assert_eq!(result.value, 1.0);
        assert_eq!(result.nodes, 2);
    }

    #[test]
    fn test_all_negative_infinity_still_picks_action() {
        let state = Tree::node(leaves(&[f64::NEG_INFINITY, f64::NEG_INFINITY])).into_state(1);
        for search in strategies() {
            assert_eq!(search(&state, 1, tree_value).best_action, Some(0));
        }
    }

    #[test]
    fn test_alpha_beta_matches_minimax_on_random_trees() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for trial in 0..200 {
            let agents = 1 + trial % 3;
            let rounds = 1 + (trial / 3) % 3;
            let state = random_tree(&mut rng, agents * rounds, 2..4).into_state(agents);

            let plain = minimax(&state, rounds as u32, tree_value);
            let pruned = alpha_beta(&state, rounds as u32, tree_value);
            assert_eq!(plain.value, pruned.value, "trial {trial}");
            assert_eq!(plain.best_action, pruned.best_action, "trial {trial}");
            assert!(pruned.nodes <= plain.nodes, "trial {trial}");
        }
    }

    #[test]
    fn test_alpha_beta_prunes_on_deeper_trees() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pruned_total = 0;
        let mut plain_total = 0;
        for _ in 0..20 {
            let state = random_tree(&mut rng, 4, 3..4).into_state(2);
            plain_total += minimax(&state, 2, tree_value).nodes;
            pruned_total += alpha_beta(&state, 2, tree_value).nodes;
        }
        assert!(pruned_total < plain_total);
    }

    /// Open room; the ghost starts three cells east of pacman.
    const STANDOFF: &str = "\
%%%%%%%%
%      %
% P  G %
%      %
%%%%%%%%";

    /// Same room with a pellet luring pacman toward the ghost.
    const LURE: &str = "\
%%%%%%%%
%      %
% P. G %
%     .%
%%%%%%%%";

    fn standoff(text: &str) -> PacmanState {
        let state = Layout::parse(text).unwrap().initial_state();
        assert_eq!(
            state.pacman.position.manhattan_distance(state.ghosts[0].position),
            3
        );
        state
    }

    #[test]
    fn test_minimax_avoids_ghost() {
        let state = standoff(STANDOFF);
        for search in [strategies()[0], strategies()[1]] {
            let result = search(&state, 2, better_evaluation);
            let action = result.best_action.unwrap();
            assert_ne!(action, Direction::East);
            let next = state.successor(0, action);
            assert!(next.pacman.position.manhattan_distance(Position::new(5, 2)) >= 3);
            assert!(result.value > -crate::evaluation::DANGER_PENALTY);
        }
    }

    #[test]
    fn test_minimax_refuses_lure() {
        let state = standoff(LURE);
        let east = state.successor(0, Direction::East);
        // Eating the pellet is the best immediate score
        assert!(east.score > state.successor(0, Direction::West).score);

        for search in [strategies()[0], strategies()[1]] {
            let result = search(&state, 2, better_evaluation);
            assert_ne!(result.best_action, Some(Direction::East));
        }
    }
}
