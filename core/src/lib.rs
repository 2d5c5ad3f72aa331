pub mod board;
pub mod game_state;
pub mod layout;
pub mod perft;
pub mod rules;
pub mod state;
pub mod types;

pub use board::*;
pub use game_state::*;
pub use layout::{layouts, render, Layout, LayoutError};
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use state::*;
pub use types::*;
