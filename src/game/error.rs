//! Move rejection errors.

use derive_more::{Display, Error};

/// Reasons the engine can reject a move.
///
/// Every rejection leaves the game unchanged; front ends map each
/// variant to a distinct message for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Position falls outside the board (must be 0-8).
    #[display("Position out of bounds (must be 0-8)")]
    OutOfBounds,
    /// The target square has already been played.
    #[display("Square is already occupied")]
    Occupied,
    /// The game has already ended in a win or a draw.
    #[display("Game is already over")]
    GameOver,
}
