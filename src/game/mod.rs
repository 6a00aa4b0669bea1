//! Tic-tac-toe game engine: board, turn order, win and draw detection.

mod engine;
mod error;
mod types;

pub use engine::Game;
pub use error::MoveError;
pub use types::{Board, GameState, GameStatus, Player, Square};
