//! Session wire protocol
//!
//! Every message exchanged between an endpoint and the server is one
//! [`Packet`], bincode-encoded inside a length-prefixed frame (see
//! [`crate::wire`]). The server is authoritative: clients only ever send
//! `Join` and `Move`; everything they render comes back from the server,
//! including the landing row of their own moves.

use crate::board::Token;
use crate::engine::{GameStatus, MoveError};
use serde::{Deserialize, Serialize};

/// Protocol compatibility version carried in `Join`
pub const PROTOCOL_VERSION: u32 = 1;

/// The opponent a joining endpoint wants to be paired with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentKind {
    /// Wait for another remote player
    Human,
    /// Play against the server-hosted random-move opponent
    Computer,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Packet {
    /// Endpoint -> server handshake, first packet on every connection
    Join {
        client_version: u32,
        opponent: OpponentKind,
    },
    /// Endpoint -> server: proposed column for the current turn
    Move { column: u8 },

    /// Server -> endpoint: seat identity for the upcoming game
    Assigned { seat: Token },
    /// Server -> both endpoints: the session is paired and play begins
    GameStart,
    /// Server -> mover: the move was applied at `row` (engine-computed)
    MoveAccepted {
        row: u8,
        column: u8,
        status: GameStatus,
    },
    /// Server -> mover: the move was refused; propose another column.
    /// The turn has not advanced and the opponent has not been told.
    MoveRejected { column: u8, reason: MoveError },
    /// Server -> non-mover: the opponent's move, to mirror locally
    OpponentMove {
        row: u8,
        column: u8,
        status: GameStatus,
    },
    /// Server -> endpoint: the session ended outside normal play
    /// (disconnect, timeout, version mismatch)
    Aborted { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use bincode::{deserialize, serialize};

    #[test]
    fn test_packet_serialization_join() {
        let packet = Packet::Join {
            client_version: PROTOCOL_VERSION,
            opponent: OpponentKind::Computer,
        };
        let bytes = serialize(&packet).unwrap();
        let decoded: Packet = deserialize(&bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_packet_serialization_move_roundtrips() {
        for column in 0..7u8 {
            let packet = Packet::Move { column };
            let decoded: Packet = deserialize(&serialize(&packet).unwrap()).unwrap();
            assert_eq!(decoded, packet);
        }
    }

    #[test]
    fn test_packet_serialization_status_variants() {
        let packets = vec![
            Packet::Assigned { seat: Token::First },
            Packet::GameStart,
            Packet::MoveAccepted {
                row: 5,
                column: 3,
                status: GameStatus::Continue,
            },
            Packet::MoveRejected {
                column: 9,
                reason: MoveError::InvalidColumn { column: 9 },
            },
            Packet::OpponentMove {
                row: 0,
                column: 6,
                status: GameStatus::SecondMoverWon,
            },
            Packet::Aborted {
                reason: "opponent disconnected".to_string(),
            },
        ];

        for packet in packets {
            let decoded: Packet = deserialize(&serialize(&packet).unwrap()).unwrap();
            assert_eq!(decoded, packet);
        }
    }

    #[test]
    fn test_malformed_bytes_fail_to_decode() {
        let valid = serialize(&Packet::GameStart).unwrap();

        let truncated = &valid[..valid.len() / 2];
        assert!(deserialize::<Packet>(truncated).is_err());

        let mut corrupted = valid.clone();
        corrupted[0] = 0xFF;
        assert!(deserialize::<Packet>(&corrupted).is_err());

        assert!(deserialize::<Packet>(&[]).is_err());
    }
}
