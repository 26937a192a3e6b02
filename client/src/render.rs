//! Text rendering of the board for the console

use shared::{Board, Token};

/// Renders the board as rows of `|`-separated cells, top row first.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..board.rows() {
        out.push('|');
        for col in 0..board.cols() {
            out.push(board.cell(row, col).map_or(' ', Token::glyph));
            out.push('|');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_renders_blank_cells() {
        let rendered = render_board(&Board::new());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        for line in lines {
            assert_eq!(line, "| | | | | | | |");
        }
    }

    #[test]
    fn test_tokens_render_in_place() {
        let mut board = Board::new();
        board.drop_token(0, Token::First).unwrap();
        board.drop_token(1, Token::Second).unwrap();
        board.drop_token(0, Token::Second).unwrap();

        let rendered = render_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[5], "|X|O| | | | | |");
        assert_eq!(lines[4], "|O| | | | | | |");
        assert_eq!(lines[3], "| | | | | | | |");
    }
}
