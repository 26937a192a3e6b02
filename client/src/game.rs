//! Client-side board mirror
//!
//! The client never decides where a token lands. It replays the rows the
//! server reports through the same single-drop mutation the engine uses,
//! and warns if the two ever disagree.

use log::warn;
use shared::{Board, GameStatus, Token};

/// Local view of one game from this endpoint's seat.
#[derive(Debug)]
pub struct ClientGame {
    board: Board,
    seat: Token,
    finished: Option<GameStatus>,
}

impl ClientGame {
    pub fn new(seat: Token) -> Self {
        Self {
            board: Board::new(),
            seat,
            finished: None,
        }
    }

    pub fn seat(&self) -> Token {
        self.seat
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The terminal status once the game has ended
    pub fn finished(&self) -> Option<GameStatus> {
        self.finished
    }

    /// Pre-check used before bothering the server with a full column
    pub fn is_column_open(&self, column: usize) -> bool {
        self.board.is_valid_column(column).unwrap_or(false)
    }

    /// Applies this endpoint's own accepted move
    pub fn apply_own_move(&mut self, row: u8, column: u8, status: GameStatus) {
        self.mirror(self.seat, row, column);
        self.record(status);
    }

    /// Applies a move relayed from the opponent
    pub fn apply_opponent_move(&mut self, row: u8, column: u8, status: GameStatus) {
        self.mirror(self.seat.other(), row, column);
        self.record(status);
    }

    /// Marks the game aborted by the server
    pub fn abort(&mut self) {
        self.finished = Some(GameStatus::Aborted);
    }

    fn mirror(&mut self, token: Token, row: u8, column: u8) {
        match self.board.drop_token(column as usize, token) {
            Ok(Some(local_row)) if local_row == row as usize => {}
            other => warn!(
                "board mirror out of sync: server row {} column {}, local {:?}",
                row, column, other
            ),
        }
    }

    fn record(&mut self, status: GameStatus) {
        if status.is_terminal() {
            self.finished = Some(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_mirror_into_the_board() {
        let mut game = ClientGame::new(Token::First);

        game.apply_own_move(5, 3, GameStatus::Continue);
        game.apply_opponent_move(5, 4, GameStatus::Continue);
        game.apply_own_move(4, 3, GameStatus::Continue);

        assert_eq!(game.board().cell(5, 3), Some(Token::First));
        assert_eq!(game.board().cell(5, 4), Some(Token::Second));
        assert_eq!(game.board().cell(4, 3), Some(Token::First));
        assert_eq!(game.finished(), None);
    }

    #[test]
    fn test_terminal_status_is_recorded() {
        let mut game = ClientGame::new(Token::Second);

        game.apply_opponent_move(5, 0, GameStatus::Continue);
        assert_eq!(game.finished(), None);

        game.apply_own_move(5, 1, GameStatus::SecondMoverWon);
        assert_eq!(game.finished(), Some(GameStatus::SecondMoverWon));
    }

    #[test]
    fn test_column_open_checks() {
        let mut game = ClientGame::new(Token::First);
        assert!(game.is_column_open(0));
        assert!(!game.is_column_open(99));

        for i in 0..6u8 {
            game.apply_own_move(5 - i, 2, GameStatus::Continue);
        }
        assert!(!game.is_column_open(2));
        assert!(game.is_column_open(3));
    }

    #[test]
    fn test_abort_marks_the_game_finished() {
        let mut game = ClientGame::new(Token::First);
        game.abort();
        assert_eq!(game.finished(), Some(GameStatus::Aborted));
    }
}
