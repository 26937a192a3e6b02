//! Authoritative game engine
//!
//! The engine owns the board; [`GameEngine::apply_move`] is the single
//! mutation path in the whole system. Session coordinators and clients
//! never touch a board directly: they either call the engine or mirror
//! the rows it reports.

use crate::board::{Board, OutOfRange, Token};
use crate::win::has_connect_four;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-visible game state.
///
/// `Continue` is the only non-terminal value; every session play loop ends
/// on exactly one of the others. `Aborted` is produced by the session
/// layer on disconnect or timeout, never by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Continue,
    FirstMoverWon,
    SecondMoverWon,
    Draw,
    Aborted,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Continue
    }

    /// The terminal status for a win by `token`
    pub fn won_by(token: Token) -> GameStatus {
        match token {
            Token::First => GameStatus::FirstMoverWon,
            Token::Second => GameStatus::SecondMoverWon,
        }
    }
}

/// Typed rejection of a move attempt.
///
/// `InvalidColumn` and `ColumnFull` are routine: the caller re-prompts the
/// same player and the board is untouched. `GameOver` marks a caller bug,
/// submitting a move after a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    InvalidColumn { column: usize },
    ColumnFull { column: usize },
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidColumn { column } => {
                write!(f, "column {} is out of range", column)
            }
            MoveError::ColumnFull { column } => write!(f, "column {} is full", column),
            MoveError::GameOver => write!(f, "the game is already over"),
        }
    }
}

impl std::error::Error for MoveError {}

impl From<OutOfRange> for MoveError {
    fn from(err: OutOfRange) -> Self {
        MoveError::InvalidColumn { column: err.column }
    }
}

/// One game of Connect Four from empty board to terminal status.
///
/// # Example
///
/// ```
/// use shared::{GameEngine, GameStatus, Token};
///
/// let mut engine = GameEngine::new();
/// let (row, status) = engine.apply_move(Token::First, 3).unwrap();
/// assert_eq!(row, 5);
/// assert_eq!(status, GameStatus::Continue);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    status: GameStatus,
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: GameStatus::Continue,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Places `token` in `column` and evaluates the result.
    ///
    /// Returns the engine-computed landing row together with the status the
    /// move produced: a win for the mover, a draw on the filling move, or
    /// `Continue`. Rejected moves leave the board unchanged and must be
    /// answered by re-prompting the same player.
    pub fn apply_move(
        &mut self,
        token: Token,
        column: usize,
    ) -> Result<(usize, GameStatus), MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = match self.board.drop_token(column, token)? {
            Some(row) => row,
            None => return Err(MoveError::ColumnFull { column }),
        };

        self.status = if has_connect_four(&self.board, token) {
            GameStatus::won_by(token)
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Continue
        };

        Ok((row, self.status))
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
