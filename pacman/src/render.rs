use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use pacman_core::{GameState, Position, PacmanState};
use std::io::{self, Write};

fn cell(state: &PacmanState, pos: Position) -> (char, Color) {
    if state.pacman.position == pos {
        return ('P', Color::Yellow);
    }
    if let Some(ghost) = state.ghosts.iter().find(|g| g.position == pos) {
        return if ghost.is_scared() {
            ('g', Color::Cyan)
        } else {
            ('G', Color::Red)
        };
    }
    if state.walls.get(pos) {
        ('%', Color::Blue)
    } else if state.food.get(pos) {
        ('.', Color::White)
    } else if state.capsules.contains(&pos) {
        ('o', Color::Magenta)
    } else {
        (' ', Color::Reset)
    }
}

/// Writes the board with colors, followed by a status line.
pub fn draw<W: Write>(out: &mut W, state: &PacmanState) -> io::Result<()> {
    for y in 0..state.height() {
        for x in 0..state.width() {
            let (ch, color) = cell(state, Position::new(x as i32, y as i32));
            queue!(out, SetForegroundColor(color), Print(ch))?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }

    let status = if state.is_win() {
        " (win)"
    } else if state.is_lose() {
        " (lose)"
    } else {
        ""
    };
    queue!(
        out,
        Print(format!(
            "Score: {}  Food left: {}{}\n",
            state.score,
            state.food_count(),
            status
        ))
    )?;
    out.flush()
}
