//! Interactive console front end.
//!
//! Two local players share the keyboard, entering moves as row and
//! column numbers. The loop renders the board after every move and runs
//! until the game is won or drawn. Bad input re-prompts without
//! consuming a turn.

use crate::game::{Game, GameStatus, MoveError, Square};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{debug, instrument};

/// Runs an interactive game on stdin/stdout until it ends.
#[instrument]
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut game = Game::new();
    play(&mut game, stdin.lock(), stdout.lock())
}

/// Drives one full game over the given reader and writer.
///
/// Separated from [`run`] so tests can script a game through in-memory
/// buffers. Returns cleanly if input ends before the game does.
fn play(game: &mut Game, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
    loop {
        render(game, &mut out)?;

        match game.state().status() {
            GameStatus::Won(player) => {
                writeln!(out, "Player {player} is the winner!")?;
                return Ok(());
            }
            GameStatus::Draw => {
                writeln!(out, "The game is a draw.")?;
                return Ok(());
            }
            GameStatus::InProgress => {}
        }

        writeln!(out, "Player {}'s Turn.", game.state().current_player())?;

        if !prompt_move(game, &mut input, &mut out)? {
            // Input ended mid-game; nothing left to do.
            return Ok(());
        }
    }
}

/// Prompts until one legal move has been applied.
///
/// Returns `Ok(false)` on end of input.
fn prompt_move(game: &mut Game, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    loop {
        write!(out, "Enter the row and column #'s (1-3): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("End of input before the game finished");
            return Ok(false);
        }

        let Some(pos) = parse_row_col(&line) else {
            writeln!(out, "Invalid Input Please Try Again.")?;
            continue;
        };

        match game.make_move(pos) {
            Ok(()) => return Ok(true),
            Err(MoveError::Occupied) => writeln!(out, "Tile is full, try again.")?,
            // Out-of-range is caught by the parser and a finished game
            // never reaches the prompt, but report rather than loop
            // silently if either ever arrives here.
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}

/// Parses "row col" input (both 1-3) into a board index (0-8).
fn parse_row_col(line: &str) -> Option<usize> {
    let mut numbers = line.split_whitespace();
    let row: usize = numbers.next()?.parse().ok()?;
    let col: usize = numbers.next()?.parse().ok()?;
    if numbers.next().is_some() {
        return None;
    }
    if !(1..=3).contains(&row) || !(1..=3).contains(&col) {
        return None;
    }
    Some((row - 1) * 3 + (col - 1))
}

/// Renders the 3x3 board with cell separators.
fn render(game: &Game, out: &mut impl Write) -> Result<()> {
    let cell = |pos: usize| -> char {
        game.state()
            .board()
            .get(pos)
            .unwrap_or(Square::Empty)
            .as_char()
    };

    for row in 0..3 {
        let base = row * 3;
        writeln!(out, "   |   |   ")?;
        writeln!(
            out,
            " {} | {} | {} ",
            cell(base),
            cell(base + 1),
            cell(base + 2)
        )?;
        if row < 2 {
            writeln!(out, "___|___|___")?;
        } else {
            writeln!(out, "   |   |   ")?;
        }
    }

    Ok(())
}
