//! Per-game session coordination
//!
//! One spawned task per session owns the engine and both endpoints, so the
//! shared board never needs locking: moves are strictly serialized by the
//! turn loop. The opponent is never notified, and never asked to move,
//! until the current mover's column has been validated and applied.

use crate::connection::Connection;
use crate::players::{PlayerSlot, RandomComputer};
use log::{info, warn};
use shared::{GameEngine, GameStatus, MoveError, Packet, Token};
use std::io;
use std::time::Duration;

/// A paired game from start notification to terminal status.
pub struct Session {
    id: u32,
    engine: GameEngine,
    first: PlayerSlot,
    second: PlayerSlot,
    move_timeout: Option<Duration>,
}

impl Session {
    pub fn new(
        id: u32,
        first: PlayerSlot,
        second: PlayerSlot,
        move_timeout: Option<Duration>,
    ) -> Self {
        Self {
            id,
            engine: GameEngine::new(),
            first,
            second,
            move_timeout,
        }
    }

    /// Plays the session to completion and returns the final status.
    ///
    /// Transport failures and move timeouts resolve to
    /// [`GameStatus::Aborted`] after a best-effort notification to the
    /// surviving endpoint.
    pub async fn run(mut self) -> GameStatus {
        info!(
            "session {}: {} (X) vs {} (O)",
            self.id,
            self.first.describe(),
            self.second.describe()
        );

        if let Err(e) = self.announce_start().await {
            warn!("session {}: endpoint lost before start: {}", self.id, e);
            return self.abort_both("opponent disconnected before the game started").await;
        }

        let mut turn = Token::First;
        loop {
            let (row, column, status) = match self.take_turn(turn).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("session {}: lost {} endpoint: {}", self.id, turn, e);
                    let reason = if e.kind() == io::ErrorKind::TimedOut {
                        "opponent timed out"
                    } else {
                        "opponent disconnected"
                    };
                    return self.abort_peer(turn.other(), reason).await;
                }
            };

            let notice = Packet::OpponentMove {
                row: row as u8,
                column: column as u8,
                status,
            };
            if let PlayerSlot::Remote(conn) = self.slot_mut(turn.other()) {
                if let Err(e) = conn.send(&notice).await {
                    warn!("session {}: lost {} endpoint: {}", self.id, turn.other(), e);
                    if !status.is_terminal() {
                        return self.abort_peer(turn, "opponent disconnected").await;
                    }
                }
            }

            if status.is_terminal() {
                info!("session {} finished: {:?}", self.id, status);
                return status;
            }
            turn = turn.other();
        }
    }

    fn slot_mut(&mut self, seat: Token) -> &mut PlayerSlot {
        match seat {
            Token::First => &mut self.first,
            Token::Second => &mut self.second,
        }
    }

    async fn announce_start(&mut self) -> io::Result<()> {
        if let PlayerSlot::Remote(conn) = &mut self.first {
            conn.send(&Packet::GameStart).await?;
        }
        if let PlayerSlot::Remote(conn) = &mut self.second {
            conn.send(&Packet::GameStart).await?;
        }
        Ok(())
    }

    /// Obtains and applies one valid move for `mover`.
    ///
    /// Remote endpoints go through the rejection/retry protocol; the
    /// computer answers synchronously and any failure on its side is a
    /// contract violation that aborts the session.
    async fn take_turn(&mut self, mover: Token) -> io::Result<(usize, usize, GameStatus)> {
        let engine = &mut self.engine;
        let move_timeout = self.move_timeout;
        let slot = match mover {
            Token::First => &mut self.first,
            Token::Second => &mut self.second,
        };

        match slot {
            PlayerSlot::Remote(conn) => remote_turn(conn, engine, mover, move_timeout).await,
            PlayerSlot::Computer(computer) => computer_turn(computer, engine, mover),
        }
    }

    async fn abort_both(&mut self, reason: &str) -> GameStatus {
        self.notify_abort(Token::First, reason).await;
        self.notify_abort(Token::Second, reason).await;
        info!("session {} aborted: {}", self.id, reason);
        GameStatus::Aborted
    }

    async fn abort_peer(&mut self, survivor: Token, reason: &str) -> GameStatus {
        self.notify_abort(survivor, reason).await;
        info!("session {} aborted: {}", self.id, reason);
        GameStatus::Aborted
    }

    async fn notify_abort(&mut self, seat: Token, reason: &str) {
        if let PlayerSlot::Remote(conn) = self.slot_mut(seat) {
            // Best effort: the peer may already be gone
            let _ = conn
                .send(&Packet::Aborted {
                    reason: reason.to_string(),
                })
                .await;
        }
    }
}

async fn remote_turn(
    conn: &mut Connection,
    engine: &mut GameEngine,
    mover: Token,
    move_timeout: Option<Duration>,
) -> io::Result<(usize, usize, GameStatus)> {
    loop {
        let packet = conn.recv_timeout(move_timeout).await?;
        let column = match packet {
            Packet::Move { column } => column as usize,
            other => {
                warn!("unexpected packet from {}: {:?}", conn.addr(), other);
                continue;
            }
        };

        match engine.apply_move(mover, column) {
            Ok((row, status)) => {
                conn.send(&Packet::MoveAccepted {
                    row: row as u8,
                    column: column as u8,
                    status,
                })
                .await?;
                return Ok((row, column, status));
            }
            Err(reason @ (MoveError::InvalidColumn { .. } | MoveError::ColumnFull { .. })) => {
                conn.send(&Packet::MoveRejected {
                    column: column as u8,
                    reason,
                })
                .await?;
            }
            Err(MoveError::GameOver) => {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, MoveError::GameOver));
            }
        }
    }
}

fn computer_turn(
    computer: &mut RandomComputer,
    engine: &mut GameEngine,
    mover: Token,
) -> io::Result<(usize, usize, GameStatus)> {
    let column = computer
        .propose_column(engine.board())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let (row, status) = engine
        .apply_move(mover, column)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!("computer plays column {}", column + 1);
    Ok((row, column, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::{TcpListener, TcpStream};

    #[tokio::test]
    async fn test_computer_vs_computer_reaches_a_terminal_status() {
        let session = Session::new(
            1,
            PlayerSlot::Computer(RandomComputer::from_seed(11)),
            PlayerSlot::Computer(RandomComputer::from_seed(22)),
            None,
        );

        let status = session.run().await;
        assert!(status.is_terminal());
        assert_ne!(status, GameStatus::Aborted);
    }

    #[tokio::test]
    async fn test_computer_sessions_with_same_seeds_agree() {
        let run_once = || async {
            Session::new(
                1,
                PlayerSlot::Computer(RandomComputer::from_seed(5)),
                PlayerSlot::Computer(RandomComputer::from_seed(9)),
                None,
            )
            .run()
            .await
        };

        assert_eq!(run_once().await, run_once().await);
    }

    #[tokio::test]
    async fn test_dead_remote_endpoint_aborts_the_session() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = TcpStream::connect(addr).await.unwrap();
        let (server_side, peer) = listener.accept().await.unwrap();
        drop(client);

        let session = Session::new(
            1,
            PlayerSlot::Remote(Connection::new(server_side, peer)),
            PlayerSlot::Computer(RandomComputer::from_seed(3)),
            None,
        );

        assert_eq!(session.run().await, GameStatus::Aborted);
    }

    #[tokio::test]
    async fn test_silent_remote_endpoint_times_out_to_abort() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = TcpStream::connect(addr).await.unwrap();
        let (server_side, peer) = listener.accept().await.unwrap();

        let session = Session::new(
            1,
            PlayerSlot::Remote(Connection::new(server_side, peer)),
            PlayerSlot::Computer(RandomComputer::from_seed(3)),
            Some(Duration::from_millis(50)),
        );

        let status = session.run().await;
        assert_eq!(status, GameStatus::Aborted);
        drop(client);
    }
}
