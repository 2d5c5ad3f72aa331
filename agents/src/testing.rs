//! Explicit game trees for exercising the search without a real environment.

use pacman_core::GameState;
use rand::Rng;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::rc::Rc;

/// A node with a heuristic value and ordered children. Leaves have no children.
#[derive(Debug, Clone)]
pub struct Tree {
    value: f64,
    children: Vec<Rc<Tree>>,
}

impl Tree {
    pub fn leaf(value: f64) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// Internal node with a zero heuristic value.
    pub fn node(children: Vec<Tree>) -> Self {
        Self {
            value: 0.0,
            children: children.into_iter().map(Rc::new).collect(),
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Wraps the tree as a game where `agents` take turns from the root.
    pub fn into_state(self, agents: usize) -> TreeState {
        TreeState {
            node: Rc::new(self),
            agents: NonZeroUsize::new(agents).expect("at least one agent"),
        }
    }
}

/// Game state positioned at one node of a [`Tree`]. Actions are child indices.
#[derive(Debug, Clone)]
pub struct TreeState {
    node: Rc<Tree>,
    agents: NonZeroUsize,
}

impl GameState for TreeState {
    type Action = usize;

    fn legal_actions(&self, _agent: usize) -> Vec<usize> {
        (0..self.node.children.len()).collect()
    }

    fn successor(&self, _agent: usize, action: usize) -> Self {
        Self {
            node: Rc::clone(&self.node.children[action]),
            agents: self.agents,
        }
    }

    fn is_win(&self) -> bool {
        false
    }

    fn is_lose(&self) -> bool {
        false
    }

    fn score(&self) -> f64 {
        self.node.value
    }

    fn agent_count(&self) -> NonZeroUsize {
        self.agents
    }
}

/// Evaluation that reads the node's stored value.
pub fn tree_value(state: &TreeState) -> f64 {
    state.node.value
}

/// Builds a tree with every leaf exactly `plies` below the root.
pub fn random_tree<R: Rng>(rng: &mut R, plies: usize, branching: Range<usize>) -> Tree {
    let value = f64::from(rng.gen_range(-50..=50));
    if plies == 0 {
        return Tree::leaf(value);
    }
    let width = rng.gen_range(branching.clone());
    let children = (0..width)
        .map(|_| random_tree(rng, plies - 1, branching.clone()))
        .collect();
    Tree::node(children).with_value(value)
}
