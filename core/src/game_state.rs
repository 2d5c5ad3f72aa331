/// Complete state of a ghost-chasing game: walls, food, power capsules,
/// the controlled agent and its adversaries.
/// This module provides the concrete environment searched by the agents.
use crate::board::Grid;
use crate::rules;
use crate::state::{GameState, PacmanView};
use crate::types::*;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Index of the controlled agent.
pub const PACMAN: usize = 0;

/// Snapshot of a game in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct PacmanState {
    /// Walls never change during a game, so successors share them
    pub walls: Arc<Grid>,
    pub food: Grid,
    pub capsules: Vec<Position>,
    pub pacman: AgentState,
    pub ghosts: Vec<GhostState>,
    pub score: i32,
    pub win: bool,
    pub lose: bool,
}

impl PacmanState {
    /// Creates a game from its parts with a zero score.
    pub fn new(
        walls: Grid,
        food: Grid,
        capsules: Vec<Position>,
        pacman: Position,
        ghosts: &[Position],
    ) -> Self {
        Self {
            walls: Arc::new(walls),
            food,
            capsules,
            pacman: AgentState::new(pacman),
            ghosts: ghosts.iter().map(|&p| GhostState::new(p)).collect(),
            score: 0,
            win: false,
            lose: false,
        }
    }

    pub fn width(&self) -> usize {
        self.walls.width()
    }

    pub fn height(&self) -> usize {
        self.walls.height()
    }

    pub fn has_wall(&self, pos: Position) -> bool {
        // Anything outside the layout is treated as wall
        !self.walls.contains(pos) || self.walls.get(pos)
    }

    pub fn has_food(&self, pos: Position) -> bool {
        self.food.get(pos)
    }

    pub fn food_count(&self) -> usize {
        self.food.count()
    }

    /// Applies an action to the state, returning a new state.
    /// This does NOT check if the action is legal.
    pub fn apply_action(&self, agent: usize, action: Direction) -> Self {
        let mut next = self.clone();
        if agent == PACMAN {
            rules::apply_pacman_action(&mut next, action);
        } else {
            rules::apply_ghost_action(&mut next, agent - 1, action);
        }
        next
    }
}

impl GameState for PacmanState {
    type Action = Direction;

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.win || self.lose {
            return Vec::new();
        }
        if agent == PACMAN {
            rules::pacman_actions(self)
        } else {
            rules::ghost_actions(self, agent - 1)
        }
    }

    fn successor(&self, agent: usize, action: Direction) -> Self {
        self.apply_action(agent, action)
    }

    fn is_win(&self) -> bool {
        self.win
    }

    fn is_lose(&self) -> bool {
        self.lose
    }

    fn score(&self) -> f64 {
        f64::from(self.score)
    }

    fn agent_count(&self) -> NonZeroUsize {
        NonZeroUsize::MIN.saturating_add(self.ghosts.len())
    }
}

impl PacmanView for PacmanState {
    fn pacman_position(&self) -> Position {
        self.pacman.position
    }

    fn food(&self) -> Vec<Position> {
        self.food.positions().collect()
    }

    fn ghosts(&self) -> &[GhostState] {
        &self.ghosts
    }

    fn capsules(&self) -> &[Position] {
        &self.capsules
    }
}
