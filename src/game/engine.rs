//! Game logic and rules for tic-tac-toe.

use super::error::MoveError;
use super::types::{GameState, GameStatus, Player, Square};
use tracing::{debug, info, instrument};

/// The 8 winning triples: rows, columns, diagonals.
///
/// Evaluated in this fixed order after every successful move; the first
/// matching triple decides the winner.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // Rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // Columns
    [0, 4, 8],
    [2, 4, 6], // Diagonals
];

/// Tic-tac-toe game engine.
///
/// A pure state machine: no I/O, every operation completes immediately
/// and either succeeds or reports the violated precondition without
/// changing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game: empty board, X to move, in progress.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Returns a read-only view of the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Makes a move at the given position (0-8).
    ///
    /// Preconditions, checked in order: the position is on the board,
    /// the game is still in progress, the square is empty. Violations
    /// leave the game untouched.
    ///
    /// On success the mark is placed and the status re-derived: a win
    /// keeps `current_player` on the winner, a draw keeps it on the
    /// last mover, otherwise the turn passes to the opponent.
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub fn make_move(&mut self, pos: usize) -> Result<(), MoveError> {
        if pos >= 9 {
            return Err(MoveError::OutOfBounds);
        }
        if self.state.status().is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.state.board().is_empty(pos) {
            return Err(MoveError::Occupied);
        }

        let player = self.state.current_player();
        self.state.place(pos, player);

        // Win before draw: a move that wins and fills the board is a win.
        if let Some(winner) = self.check_winner() {
            info!(%winner, moves = self.state.history().len(), "Game won");
            self.state.set_status(GameStatus::Won(winner));
        } else if self.state.board().is_full() {
            info!(moves = self.state.history().len(), "Game drawn");
            self.state.set_status(GameStatus::Draw);
        } else {
            self.state.advance_turn();
            debug!(next = %self.state.current_player(), "Move accepted");
        }

        Ok(())
    }

    /// Resets the game to its initial state, discarding all moves.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(moves_discarded = self.state.history().len(), "Resetting game");
        self.state = GameState::new();
    }

    /// Scans all 8 triples for a winner.
    ///
    /// Always evaluates the full board rather than just the last move;
    /// at 8 fixed triples there is nothing worth optimizing.
    fn check_winner(&self) -> Option<Player> {
        let board = self.state.board();

        for [a, b, c] in LINES {
            if let Some(Square::Occupied(player)) = board.get(a)
                && board.get(b) == Some(Square::Occupied(player))
                && board.get(c) == Some(Square::Occupied(player))
            {
                return Some(player);
            }
        }

        None
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
