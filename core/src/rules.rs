use crate::game_state::PacmanState;
use crate::types::{Direction, Position};

/// Moves a harmless ghost stays harmless after a capsule is eaten.
pub const SCARED_TIME: u32 = 40;
/// Cost of every controlled-agent move.
pub const TIME_PENALTY: i32 = 1;
pub const FOOD_SCORE: i32 = 10;
pub const WIN_BONUS: i32 = 500;
pub const LOSE_PENALTY: i32 = 500;
pub const GHOST_SCORE: i32 = 200;

/// Directions that lead from `pos` into a non-wall cell.
fn open_directions(state: &PacmanState, pos: Position) -> Vec<Direction> {
    Direction::CARDINALS
        .into_iter()
        .filter(|&dir| !state.has_wall(pos.step(dir)))
        .collect()
}

/// Generates the controlled agent's legal actions. `Stop` is always last.
pub fn pacman_actions(state: &PacmanState) -> Vec<Direction> {
    let mut actions = open_directions(state, state.pacman.position);
    actions.push(Direction::Stop);
    actions
}

/// Generates a ghost's legal actions.
/// Ghosts cannot stop and only turn back when nothing else is open.
pub fn ghost_actions(state: &PacmanState, ghost: usize) -> Vec<Direction> {
    let Some(g) = state.ghosts.get(ghost) else {
        return Vec::new();
    };

    let mut actions = open_directions(state, g.position);
    let reverse = g.direction.reverse();
    if actions.len() > 1 {
        actions.retain(|&dir| dir != reverse);
    }
    actions
}

/// Moves the controlled agent and resolves eating and collisions.
pub(crate) fn apply_pacman_action(state: &mut PacmanState, action: Direction) {
    let target = state.pacman.position.step(action);
    if !state.has_wall(target) {
        state.pacman.position = target;
    }
    state.pacman.direction = action;
    state.score -= TIME_PENALTY;

    let pos = state.pacman.position;
    consume(state, pos);

    for ghost in 0..state.ghosts.len() {
        check_collision(state, ghost);
    }
}

/// Moves a ghost, ticks its harmless timer and resolves collisions.
pub(crate) fn apply_ghost_action(state: &mut PacmanState, ghost: usize, action: Direction) {
    let Some(g) = state.ghosts.get_mut(ghost) else {
        return;
    };

    let target = g.position.step(action);
    if !state.walls.get(target) && state.walls.contains(target) {
        g.position = target;
    }
    g.direction = action;
    g.scared_timer = g.scared_timer.saturating_sub(1);

    check_collision(state, ghost);
}

fn consume(state: &mut PacmanState, pos: Position) {
    if state.food.get(pos) {
        state.food.set(pos, false);
        state.score += FOOD_SCORE;
        if state.food.count() == 0 && !state.lose {
            state.score += WIN_BONUS;
            state.win = true;
        }
    }

    if let Some(i) = state.capsules.iter().position(|&c| c == pos) {
        state.capsules.swap_remove(i);
        for g in &mut state.ghosts {
            g.scared_timer = SCARED_TIME;
        }
    }
}

fn check_collision(state: &mut PacmanState, ghost: usize) {
    if state.win || state.lose {
        return;
    }
    let pacman = state.pacman.position;
    let g = &mut state.ghosts[ghost];
    if g.position != pacman {
        return;
    }

    if g.is_scared() {
        state.score += GHOST_SCORE;
        g.position = g.start;
        g.direction = Direction::Stop;
        g.scared_timer = 0;
    } else {
        state.score -= LOSE_PENALTY;
        state.lose = true;
    }
}
