//! Board state and gravity placement for the Connect Four grid

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows in a standard board
pub const ROWS: usize = 6;
/// Number of columns in a standard board
pub const COLS: usize = 7;
/// Run length required to win
pub const CONNECT: usize = 4;

/// One of the two player identities in a game.
///
/// `First` always moves first and is rendered as `X`; `Second` is rendered
/// as `O`. The identity doubles as the token value occupying board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    First,
    Second,
}

impl Token {
    /// The opposing identity
    pub fn other(self) -> Token {
        match self {
            Token::First => Token::Second,
            Token::Second => Token::First,
        }
    }

    /// Display character used by the text presentation layer
    pub fn glyph(self) -> char {
        match self {
            Token::First => 'X',
            Token::Second => 'O',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Error for column indices outside `[0, COLS)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfRange {
    pub column: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {} is outside 0..{}", self.column, COLS)
    }
}

impl std::error::Error for OutOfRange {}

/// The 6x7 playing grid.
///
/// Row 0 is the top of the board, row `ROWS - 1` the bottom. Every column
/// is bottom-aligned with no gaps: the only mutation is [`Board::drop_token`],
/// which always fills the lowest empty cell of its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Token>; COLS]; ROWS],
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn cols(&self) -> usize {
        COLS
    }

    /// Returns the occupant of a cell, `None` if empty.
    ///
    /// Panics if `row` or `col` is out of bounds; presentation code is
    /// expected to iterate within `rows()`/`cols()`.
    pub fn cell(&self, row: usize, col: usize) -> Option<Token> {
        self.cells[row][col]
    }

    /// Checks whether a column can accept another token.
    ///
    /// Fails with [`OutOfRange`] for indices outside the grid; otherwise
    /// returns true iff the topmost cell of the column is empty.
    pub fn is_valid_column(&self, column: usize) -> Result<bool, OutOfRange> {
        if column >= COLS {
            return Err(OutOfRange { column });
        }
        Ok(self.cells[0][column].is_none())
    }

    /// Drops a token into a column.
    ///
    /// Returns the row the token landed in, or `Ok(None)` if the column is
    /// already full. A full column is a routine game event the caller
    /// answers with a retry prompt, not an error. The board is unchanged
    /// in both non-placing cases.
    pub fn drop_token(&mut self, column: usize, token: Token) -> Result<Option<usize>, OutOfRange> {
        if column >= COLS {
            return Err(OutOfRange { column });
        }
        for row in (0..ROWS).rev() {
            if self.cells[row][column].is_none() {
                self.cells[row][column] = Some(token);
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// True iff every column's top cell is occupied
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.cells[0][col].is_some())
    }

    /// All column indices currently accepting a token
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..COLS)
            .filter(|&col| self.cells[0][col].is_none())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.cell(row, col), None);
            }
        }
        assert!(!board.is_full());
        assert_eq!(board.valid_columns(), (0..COLS).collect::<Vec<_>>());
    }

    #[test]
    fn test_drop_lands_on_bottom_row() {
        let mut board = Board::new();
        let row = board.drop_token(3, Token::First).unwrap();
        assert_eq!(row, Some(ROWS - 1));
        assert_eq!(board.cell(ROWS - 1, 3), Some(Token::First));
    }

    #[test]
    fn test_drops_stack_upwards() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let token = if i % 2 == 0 {
                Token::First
            } else {
                Token::Second
            };
            let row = board.drop_token(0, token).unwrap();
            assert_eq!(row, Some(ROWS - 1 - i));
        }
    }

    #[test]
    fn test_column_holds_exactly_six_tokens() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            assert!(board.drop_token(3, Token::First).unwrap().is_some());
        }
        // Seventh attempt finds the column full and changes nothing
        let before = board.clone();
        assert_eq!(board.drop_token(3, Token::Second).unwrap(), None);
        assert_eq!(board, before);
        assert_eq!(board.is_valid_column(3), Ok(false));
    }

    #[test]
    fn test_out_of_range_column_is_rejected() {
        let mut board = Board::new();
        assert_eq!(
            board.is_valid_column(COLS),
            Err(OutOfRange { column: COLS })
        );
        assert_eq!(
            board.drop_token(99, Token::First),
            Err(OutOfRange { column: 99 })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_valid_columns_shrink_as_columns_fill() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_token(2, Token::First).unwrap();
        }
        let valid = board.valid_columns();
        assert_eq!(valid.len(), COLS - 1);
        assert!(!valid.contains(&2));
    }

    #[test]
    fn test_valid_columns_is_idempotent() {
        let mut board = Board::new();
        board.drop_token(1, Token::First).unwrap();
        board.drop_token(4, Token::Second).unwrap();
        assert_eq!(board.valid_columns(), board.valid_columns());
    }

    #[test]
    fn test_full_board_detection() {
        let mut board = Board::new();
        for col in 0..COLS {
            for i in 0..ROWS {
                let token = if (col + i) % 2 == 0 {
                    Token::First
                } else {
                    Token::Second
                };
                board.drop_token(col, token).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.valid_columns().is_empty());
    }

    #[test]
    fn test_token_other_and_glyph() {
        assert_eq!(Token::First.other(), Token::Second);
        assert_eq!(Token::Second.other(), Token::First);
        assert_eq!(Token::First.glyph(), 'X');
        assert_eq!(Token::Second.glyph(), 'O');
    }
}
