//! Tic-tac-toe - one game engine, two front ends.
//!
//! # Architecture
//!
//! - **Engine**: pure state machine for the board, turn order, and
//!   win/draw detection. No I/O; both front ends drive the same code.
//! - **Console**: interactive terminal loop for two local players.
//! - **Server**: REST API exposing a single shared game instance.
//!
//! # Example
//!
//! ```
//! use tictactoe::{Game, GameStatus, Player};
//!
//! let mut game = Game::new();
//! game.make_move(4)?;
//! assert_eq!(game.state().current_player(), Player::O);
//! assert_eq!(game.state().status(), GameStatus::InProgress);
//! # Ok::<(), tictactoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game;

// Front ends and binary surface
pub mod cli;
pub mod console;
pub mod server;

// Crate-level exports - Game engine
pub use game::{Board, Game, GameState, GameStatus, MoveError, Player, Square};
