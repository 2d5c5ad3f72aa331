//! The capability set a search needs from an environment.
//!
//! Agent index 0 is always the controlled agent. Indices `1..agent_count`
//! are adversaries that move in increasing order; a round is complete once
//! the last index has moved.

use crate::types::{GhostState, Position};
use std::fmt::Debug;
use std::num::NonZeroUsize;

/// Read-only view of a turn-based, multi-agent environment.
pub trait GameState: Clone {
    type Action: Copy + Eq + Debug;

    /// Legal actions for the given agent. May be empty.
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    /// Returns the state after `agent` takes `action`. Never mutates `self`.
    fn successor(&self, agent: usize, action: Self::Action) -> Self;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }

    /// Base environment score.
    fn score(&self) -> f64;

    fn agent_count(&self) -> NonZeroUsize;
}

/// Accessors evaluation functions use to inspect the controlled agent's world.
pub trait PacmanView {
    fn pacman_position(&self) -> Position;

    /// Remaining goal items.
    fn food(&self) -> Vec<Position>;

    fn ghosts(&self) -> &[GhostState];

    /// Remaining power items.
    fn capsules(&self) -> &[Position];
}

/// Returns the agent that moves after `agent`, and the depth it searches at.
/// Depth drops by one once the last agent of the round has moved.
pub fn next_turn(agent: usize, depth: u32, agent_count: NonZeroUsize) -> (usize, u32) {
    if agent + 1 >= agent_count.get() {
        (0, depth.saturating_sub(1))
    } else {
        (agent + 1, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_next_turn_within_round() {
        assert_eq!(next_turn(0, 2, count(3)), (1, 2));
        assert_eq!(next_turn(1, 2, count(3)), (2, 2));
    }

    #[test]
    fn test_next_turn_completes_round() {
        assert_eq!(next_turn(2, 2, count(3)), (0, 1));
        assert_eq!(next_turn(1, 1, count(2)), (0, 0));
    }

    #[test]
    fn test_next_turn_single_agent() {
        // Every move of a lone agent is a full round
        assert_eq!(next_turn(0, 3, count(1)), (0, 2));
    }
}
