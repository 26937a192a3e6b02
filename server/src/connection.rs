//! Framed TCP endpoint used by the listener and session workers

use log::debug;
use shared::wire::{read_packet, write_packet};
use shared::Packet;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// One connected endpoint: a TCP stream plus the peer address for logging.
///
/// All packet I/O for a session goes through here; the session worker owns
/// its two connections exclusively, so no locking is involved.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
}

impl Connection {
    pub fn new(stream: TcpStream, addr: SocketAddr) -> Self {
        Self { stream, addr }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Sends one packet and flushes it to the peer
    pub async fn send(&mut self, packet: &Packet) -> io::Result<()> {
        debug!("-> {}: {:?}", self.addr, packet);
        write_packet(&mut self.stream, packet).await
    }

    /// Receives the next packet, blocking until one arrives
    pub async fn recv(&mut self) -> io::Result<Packet> {
        let packet = read_packet(&mut self.stream).await?;
        debug!("<- {}: {:?}", self.addr, packet);
        Ok(packet)
    }

    /// Receives the next packet, giving up after `limit` if set.
    ///
    /// A lapsed timeout surfaces as `ErrorKind::TimedOut`, which the
    /// session layer treats the same as a disconnect: the session aborts.
    pub async fn recv_timeout(&mut self, limit: Option<Duration>) -> io::Result<Packet> {
        match limit {
            Some(limit) => match timeout(limit, self.recv()).await {
                Ok(result) => result,
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("no move from {} within {:?}", self.addr, limit),
                )),
            },
            None => self.recv().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn connected_pair() -> (Connection, Connection) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = TcpStream::connect(addr).await.unwrap();
        let (server_side, peer) = listener.accept().await.unwrap();

        (
            Connection::new(client, addr),
            Connection::new(server_side, peer),
        )
    }

    #[tokio::test]
    async fn test_send_and_recv_roundtrip() {
        let (mut client, mut server) = connected_pair().await;

        client.send(&Packet::Move { column: 3 }).await.unwrap();
        let packet = server.recv().await.unwrap();
        assert_eq!(packet, Packet::Move { column: 3 });

        server.send(&Packet::GameStart).await.unwrap();
        assert_eq!(client.recv().await.unwrap(), Packet::GameStart);
    }

    #[tokio::test]
    async fn test_recv_timeout_elapses() {
        let (_client, mut server) = connected_pair().await;

        let err = server
            .recv_timeout(Some(Duration::from_millis(50)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn test_recv_reports_peer_disconnect() {
        let (client, mut server) = connected_pair().await;
        drop(client);

        let err = server.recv().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
