//! Length-prefixed packet framing
//!
//! TCP gives us a byte stream, so each bincode-encoded [`Packet`] travels
//! behind a 4-byte big-endian length prefix. Reads enforce a maximum frame
//! length so a corrupt or hostile peer cannot make the server allocate
//! arbitrarily.

use crate::protocol::Packet;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single frame body; real packets are a few dozen bytes
pub const MAX_FRAME_LEN: u32 = 1024;

/// Reads one framed packet from the stream.
///
/// Fails with `UnexpectedEof` on a closed connection, `InvalidData` on a
/// zero/oversized length prefix or an undecodable body.
pub async fn read_packet<R>(reader: &mut R) -> io::Result<Packet>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf);

    if len == 0 || len > MAX_FRAME_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame length {} outside 1..={}", len, MAX_FRAME_LEN),
        ));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;

    bincode::deserialize(&body).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes one framed packet and flushes the stream.
pub async fn write_packet<W>(writer: &mut W, packet: &Packet) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body =
        bincode::serialize(packet).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let len = body.len() as u32;

    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await
}
