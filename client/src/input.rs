//! Column prompt for the text console
//!
//! Reads a 1-based column number from stdin, with an explicit retry loop
//! bounded by the validation predicate: bad text and out-of-range numbers
//! re-prompt locally without touching the server.

use shared::COLS;
use std::io::{self, BufRead, Write};

/// Parses a 1-based column choice into a 0-based column index.
pub fn parse_column(line: &str) -> Result<usize, String> {
    let trimmed = line.trim();
    let value: usize = trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a number", trimmed))?;

    if (1..=COLS).contains(&value) {
        Ok(value - 1)
    } else {
        Err(format!("column must be between 1 and {}", COLS))
    }
}

/// Prompts on stdout and blocks on stdin until a valid column is entered.
///
/// Fails only if stdin closes; every invalid entry re-prompts.
pub fn prompt_column() -> io::Result<usize> {
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    loop {
        println!("Choose column: 1-{}", COLS);
        let footer: String = (1..=COLS).map(|c| format!("[{}]", c)).collect();
        println!("{}", footer);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for a column",
            ));
        }

        match parse_column(&line) {
            Ok(column) => return Ok(column),
            Err(msg) => println!("Invalid input. Try again! ({})", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_columns_parse_to_zero_based() {
        assert_eq!(parse_column("1"), Ok(0));
        assert_eq!(parse_column("7"), Ok(6));
        assert_eq!(parse_column(" 4 \n"), Ok(3));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(parse_column("0").is_err());
        assert!(parse_column("8").is_err());
        assert!(parse_column("100").is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_column("").is_err());
        assert!(parse_column("abc").is_err());
        assert!(parse_column("-3").is_err());
        assert!(parse_column("3.5").is_err());
    }
}
