use crate::board::Grid;
use crate::game_state::PacmanState;
use crate::types::Position;
use thiserror::Error;

/// Layout parsing error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    #[error("row {row} has width {got}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("invalid layout character '{character}' at ({x}, {y})")]
    InvalidCharacter { character: char, x: usize, y: usize },
    #[error("layout has no controlled agent 'P'")]
    MissingPacman,
    #[error("layout has more than one controlled agent 'P'")]
    DuplicatePacman,
}

/// A parsed layout: static walls plus initial positions.
///
/// The text form uses `%` wall, `.` food, `o` capsule, `P` the controlled
/// agent, `G` or a digit an adversary, space an empty cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub walls: Grid,
    pub food: Grid,
    pub capsules: Vec<Position>,
    pub pacman: Position,
    pub ghosts: Vec<Position>,
}

impl Layout {
    /// Parses a layout from its text form.
    /// Blank lines before the first row and after the last are ignored.
    /// Every row in between, blank or not, must have the same width.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();

        let is_row = |line: &&str| !line.trim().is_empty();
        let Some(start) = lines.iter().position(is_row) else {
            return Err(LayoutError::Empty);
        };
        let end = lines.iter().rposition(is_row).map_or(start, |i| i + 1);
        let rows = &lines[start..end];

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut walls = Grid::new(width, height);
        let mut food = Grid::new(width, height);
        let mut capsules = Vec::new();
        let mut pacman = None;
        // Numbered ghosts keep their number as ordering key
        let mut ghosts: Vec<(u32, Position)> = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let got = row.chars().count();
            if got != width {
                return Err(LayoutError::RaggedRow {
                    row: y,
                    expected: width,
                    got,
                });
            }

            for (x, ch) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                match ch {
                    '%' => walls.set(pos, true),
                    '.' => food.set(pos, true),
                    'o' => capsules.push(pos),
                    'P' => {
                        if pacman.replace(pos).is_some() {
                            return Err(LayoutError::DuplicatePacman);
                        }
                    }
                    'G' => ghosts.push((0, pos)),
                    '1'..='9' => ghosts.push((ch.to_digit(10).unwrap_or(0), pos)),
                    ' ' => {}
                    _ => {
                        return Err(LayoutError::InvalidCharacter {
                            character: ch,
                            x,
                            y,
                        })
                    }
                }
            }
        }

        let pacman = pacman.ok_or(LayoutError::MissingPacman)?;
        ghosts.sort_by_key(|&(number, _)| number);

        Ok(Layout {
            walls,
            food,
            capsules,
            pacman,
            ghosts: ghosts.into_iter().map(|(_, pos)| pos).collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.walls.width()
    }

    pub fn height(&self) -> usize {
        self.walls.height()
    }

    /// Number of agents, the controlled one included.
    pub fn agent_count(&self) -> usize {
        1 + self.ghosts.len()
    }

    /// Builds the starting game state.
    pub fn initial_state(&self) -> PacmanState {
        PacmanState::new(
            self.walls.clone(),
            self.food.clone(),
            self.capsules.clone(),
            self.pacman,
            &self.ghosts,
        )
    }
}

/// Renders a state back into layout text.
/// Ghosts are written as `G`; a ghost sharing a cell with food hides it.
pub fn render(state: &PacmanState) -> String {
    let mut out = String::with_capacity((state.width() + 1) * state.height());
    for y in 0..state.height() {
        for x in 0..state.width() {
            let pos = Position::new(x as i32, y as i32);
            let ch = if state.pacman.position == pos {
                'P'
            } else if state.ghosts.iter().any(|g| g.position == pos) {
                'G'
            } else if state.walls.get(pos) {
                '%'
            } else if state.food.get(pos) {
                '.'
            } else if state.capsules.contains(&pos) {
                'o'
            } else {
                ' '
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Built-in layouts.
pub mod layouts {
    use super::{Layout, LayoutError};

    /// Small open room with food in the corners and one ghost.
    pub const TEST: &str = "\
%%%%%%%
%.   .%
%  G  %
%     %
%. P .%
%%%%%%%";

    /// Corridor maze with two ghosts guarding food.
    pub const MINIMAX: &str = "\
%%%%%%%%%
%.P    G%
% %.%G%%%
%      .%
%%%%%%%%%";

    /// Pacman boxed in next to a ghost; the only food is behind it.
    pub const TRAPPED: &str = "\
%%%%%%%%
%   P G%
%.%%%%%%
%%%%%%%%";

    /// Medium maze with capsules.
    pub const SMALL: &str = "\
%%%%%%%%%%%%%%%%%%%%
%......%G  G%......%
%.%%...%%  %%...%%.%
%.%o.%........%.o%.%
%.%%.%.%%%%%%.%.%%.%
%........P.........%
%%%%%%%%%%%%%%%%%%%%";

    /// Names accepted by [`by_name`].
    pub const NAMES: &[&str] = &["test", "minimax", "trapped", "small"];

    /// Returns the text of a built-in layout.
    pub fn text(name: &str) -> Option<&'static str> {
        match name {
            "test" => Some(TEST),
            "minimax" => Some(MINIMAX),
            "trapped" => Some(TRAPPED),
            "small" => Some(SMALL),
            _ => None,
        }
    }

    /// Parses a built-in layout by name.
    pub fn by_name(name: &str) -> Option<Result<Layout, LayoutError>> {
        text(name).map(Layout::parse)
    }
}
