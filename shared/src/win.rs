//! Four-in-a-row detection
//!
//! A pure scan over the board for one token; the session layer calls it
//! after every placement for the token of the player who just moved, since
//! only that player can have completed a new run.

use crate::board::{Board, Token, COLS, CONNECT, ROWS};

/// True iff `token` occupies four consecutive cells horizontally,
/// vertically, or on either diagonal.
pub fn has_connect_four(board: &Board, token: Token) -> bool {
    check_horizontal(board, token)
        || check_vertical(board, token)
        || check_diagonal_down(board, token)
        || check_diagonal_up(board, token)
}

fn check_horizontal(board: &Board, token: Token) -> bool {
    for row in 0..ROWS {
        for col in 0..=COLS - CONNECT {
            if (0..CONNECT).all(|i| board.cell(row, col + i) == Some(token)) {
                return true;
            }
        }
    }
    false
}

fn check_vertical(board: &Board, token: Token) -> bool {
    for col in 0..COLS {
        for row in 0..=ROWS - CONNECT {
            if (0..CONNECT).all(|i| board.cell(row + i, col) == Some(token)) {
                return true;
            }
        }
    }
    false
}

// Top-left to bottom-right
fn check_diagonal_down(board: &Board, token: Token) -> bool {
    for row in 0..=ROWS - CONNECT {
        for col in 0..=COLS - CONNECT {
            if (0..CONNECT).all(|i| board.cell(row + i, col + i) == Some(token)) {
                return true;
            }
        }
    }
    false
}

// Top-right to bottom-left
fn check_diagonal_up(board: &Board, token: Token) -> bool {
    for row in 0..=ROWS - CONNECT {
        for col in CONNECT - 1..COLS {
            if (0..CONNECT).all(|i| board.cell(row + i, col - i) == Some(token)) {
                return true;
            }
        }
    }
    false
}
