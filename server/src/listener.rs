//! Connection acceptance and session pairing
//!
//! The listener runs the accept loop, performs the `Join` handshake, and
//! seats endpoints: a computer-opponent request starts a session
//! immediately, while human-opponent requests are paired first-come,
//! first-served. Each completed pairing spawns an independent session
//! task; the listener shares no mutable state with running sessions.

use crate::connection::Connection;
use crate::players::{PlayerSlot, RandomComputer};
use crate::session::Session;
use log::{info, warn};
use shared::{OpponentKind, Packet, Token, PROTOCOL_VERSION};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

/// How long a fresh connection may take to send its `Join`
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Listener {
    listener: TcpListener,
    move_timeout: Option<Duration>,
    next_session_id: u32,
    /// A human-opponent endpoint waiting for a partner
    pending: Option<Connection>,
}

impl Listener {
    pub async fn bind(addr: &str, move_timeout: Option<Duration>) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            move_timeout,
            next_session_id: 1,
            pending: None,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop; runs until the socket fails
    pub async fn run(mut self) -> io::Result<()> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            let _ = stream.set_nodelay(true);
            let mut conn = Connection::new(stream, addr);

            match self.handshake(&mut conn).await {
                Ok(opponent) => self.seat(conn, opponent).await,
                Err(e) => warn!("rejected connection from {}: {}", addr, e),
            }
        }
    }

    async fn handshake(&mut self, conn: &mut Connection) -> io::Result<OpponentKind> {
        let packet = conn.recv_timeout(Some(HANDSHAKE_TIMEOUT)).await?;

        match packet {
            Packet::Join {
                client_version,
                opponent,
            } if client_version == PROTOCOL_VERSION => Ok(opponent),
            Packet::Join { client_version, .. } => {
                let reason = format!(
                    "protocol version mismatch: server speaks {}, client spoke {}",
                    PROTOCOL_VERSION, client_version
                );
                let _ = conn
                    .send(&Packet::Aborted {
                        reason: reason.clone(),
                    })
                    .await;
                Err(io::Error::new(io::ErrorKind::InvalidData, reason))
            }
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected Join, got {:?}", other),
            )),
        }
    }

    async fn seat(&mut self, mut conn: Connection, opponent: OpponentKind) {
        match opponent {
            OpponentKind::Computer => {
                if let Err(e) = conn.send(&Packet::Assigned { seat: Token::First }).await {
                    warn!("lost {} during seating: {}", conn.addr(), e);
                    return;
                }
                info!(
                    "player from {} joins session {} against the computer",
                    conn.addr(),
                    self.next_session_id
                );
                self.spawn_session(
                    PlayerSlot::Remote(conn),
                    PlayerSlot::Computer(RandomComputer::new()),
                );
            }
            OpponentKind::Human => match self.pending.take() {
                Some(waiting) => {
                    if let Err(e) = conn.send(&Packet::Assigned { seat: Token::Second }).await {
                        warn!("lost {} during seating: {}", conn.addr(), e);
                        self.pending = Some(waiting);
                        return;
                    }
                    info!("player 2 from {} joins session {}", conn.addr(), self.next_session_id);
                    self.spawn_session(PlayerSlot::Remote(waiting), PlayerSlot::Remote(conn));
                }
                None => {
                    if let Err(e) = conn.send(&Packet::Assigned { seat: Token::First }).await {
                        warn!("lost {} during seating: {}", conn.addr(), e);
                        return;
                    }
                    info!(
                        "player 1 from {} waiting for session {}",
                        conn.addr(),
                        self.next_session_id
                    );
                    self.pending = Some(conn);
                }
            },
        }
    }

    fn spawn_session(&mut self, first: PlayerSlot, second: PlayerSlot) {
        let id = self.next_session_id;
        self.next_session_id += 1;

        let session = Session::new(id, first, second, self.move_timeout);
        tokio::spawn(session.run());
    }
}
