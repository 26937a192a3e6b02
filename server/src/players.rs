//! Player endpoint variants
//!
//! A session seats two players, each either a remote connection or the
//! local random-move opponent. The variants share exactly one capability,
//! producing a column for the current turn, and the session dispatches on
//! the variant explicitly: a remote player goes through the packet/retry
//! protocol, while the computer answers synchronously and is never
//! allowed to be wrong.

use crate::connection::Connection;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shared::Board;
use std::fmt;

/// One seat in a session
#[derive(Debug)]
pub enum PlayerSlot {
    Remote(Connection),
    Computer(RandomComputer),
}

impl PlayerSlot {
    /// Short description for session logs
    pub fn describe(&self) -> String {
        match self {
            PlayerSlot::Remote(conn) => format!("remote {}", conn.addr()),
            PlayerSlot::Computer(_) => "computer".to_string(),
        }
    }
}

/// Error for asking the computer to move on a full board.
///
/// A contract violation by the caller (the session checks the game status
/// before every turn), so it aborts the session rather than being
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoLegalMove;

impl fmt::Display for NoLegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no legal column available")
    }
}

impl std::error::Error for NoLegalMove {}

/// The scripted computer opponent: a uniformly random legal column.
///
/// Uses an owned `StdRng` so session tasks stay `Send` and tests can seed
/// the choice deterministically.
#[derive(Debug)]
pub struct RandomComputer {
    rng: StdRng,
}

impl RandomComputer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a column uniformly from the board's currently valid columns
    pub fn propose_column(&mut self, board: &Board) -> Result<usize, NoLegalMove> {
        board
            .valid_columns()
            .choose(&mut self.rng)
            .copied()
            .ok_or(NoLegalMove)
    }
}

impl Default for RandomComputer {
    fn default() -> Self {
        Self::new()
    }
}
