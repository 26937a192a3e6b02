//! Scripted smoke client: joins the server against the computer opponent
//! and plays uniformly random legal moves until the game ends.

use rand::seq::SliceRandom;
use shared::wire::{read_packet, write_packet};
use shared::{Board, OpponentKind, Packet, PROTOCOL_VERSION};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server_addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());

    println!("Connecting to {}", server_addr);
    let mut stream = TcpStream::connect(&server_addr).await?;

    write_packet(
        &mut stream,
        &Packet::Join {
            client_version: PROTOCOL_VERSION,
            opponent: OpponentKind::Computer,
        },
    )
    .await?;

    let seat = match read_packet(&mut stream).await? {
        Packet::Assigned { seat } => seat,
        other => return Err(format!("expected seat assignment, got {:?}", other).into()),
    };
    println!("Seated as {:?} ('{}')", seat, seat.glyph());

    match read_packet(&mut stream).await? {
        Packet::GameStart => println!("Game started"),
        other => return Err(format!("expected game start, got {:?}", other).into()),
    }

    let mut board = Board::new();
    let mut rng = rand::thread_rng();

    // First mover opens; the board holds at most 42 tokens
    for _ in 0..42 {
        let column = *board
            .valid_columns()
            .choose(&mut rng)
            .ok_or("no legal column left, server should have ended the game")?;
        write_packet(
            &mut stream,
            &Packet::Move {
                column: column as u8,
            },
        )
        .await?;

        match read_packet(&mut stream).await? {
            Packet::MoveAccepted { row, column, status } => {
                board.drop_token(column as usize, seat)?;
                println!("Played column {} (landed row {})", column + 1, row);
                if status.is_terminal() {
                    println!("Game over: {:?}", status);
                    return Ok(());
                }
            }
            other => return Err(format!("expected move ack, got {:?}", other).into()),
        }

        match read_packet(&mut stream).await? {
            Packet::OpponentMove { row, column, status } => {
                board.drop_token(column as usize, seat.other())?;
                println!("Computer played column {} (landed row {})", column + 1, row);
                if status.is_terminal() {
                    println!("Game over: {:?}", status);
                    return Ok(());
                }
            }
            Packet::Aborted { reason } => {
                println!("Session aborted: {}", reason);
                return Ok(());
            }
            other => return Err(format!("expected opponent move, got {:?}", other).into()),
        }
    }

    Err("game did not terminate within 42 moves".into())
}
