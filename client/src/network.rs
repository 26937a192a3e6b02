//! Client connection and packet loop
//!
//! The protocol is strictly turn-based, so the packet loop is a plain
//! sequential await chain. Stdin prompting happens on a blocking task so
//! the socket stays serviceable.

use crate::game::ClientGame;
use crate::input;
use crate::render::render_board;
use log::{info, warn};
use shared::wire::{read_packet, write_packet};
use shared::{GameStatus, OpponentKind, Packet, Token, PROTOCOL_VERSION};
use tokio::net::TcpStream;

type BoxError = Box<dyn std::error::Error>;

pub struct Client {
    stream: TcpStream,
    opponent: OpponentKind,
}

impl Client {
    pub async fn connect(server_addr: &str, opponent: OpponentKind) -> Result<Self, BoxError> {
        info!("Connecting to server...");
        let stream = TcpStream::connect(server_addr).await?;
        stream.set_nodelay(true)?;
        info!("Connected to {}", server_addr);

        Ok(Self { stream, opponent })
    }

    /// Plays one full game, rendering to stdout, then returns.
    pub async fn run(&mut self) -> Result<(), BoxError> {
        write_packet(
            &mut self.stream,
            &Packet::Join {
                client_version: PROTOCOL_VERSION,
                opponent: self.opponent,
            },
        )
        .await?;

        let seat = match read_packet(&mut self.stream).await? {
            Packet::Assigned { seat } => seat,
            Packet::Aborted { reason } => {
                println!("Server refused the connection: {}", reason);
                return Ok(());
            }
            other => return Err(format!("expected a seat assignment, got {:?}", other).into()),
        };

        let mut game = ClientGame::new(seat);
        match seat {
            Token::First => {
                println!("You are Player 1 with token 'X'");
                if self.opponent == OpponentKind::Human {
                    println!("Waiting for player 2 to join...");
                }
            }
            Token::Second => println!("You are Player 2 with token 'O'"),
        }

        match read_packet(&mut self.stream).await? {
            Packet::GameStart => {}
            Packet::Aborted { reason } => {
                println!("Game aborted: {}", reason);
                return Ok(());
            }
            other => return Err(format!("expected the game start, got {:?}", other).into()),
        }

        println!("Game on!");
        println!("{}", render_board(game.board()));

        if seat == Token::First {
            self.take_turn(&mut game).await?;
            if let Some(status) = game.finished() {
                announce_result(status, seat);
                return Ok(());
            }
        }

        loop {
            match read_packet(&mut self.stream).await? {
                Packet::OpponentMove {
                    row,
                    column,
                    status,
                } => {
                    game.apply_opponent_move(row, column, status);
                    println!("Opponent chose column {}", column + 1);
                    println!("{}", render_board(game.board()));

                    if let Some(status) = game.finished() {
                        announce_result(status, seat);
                        return Ok(());
                    }

                    self.take_turn(&mut game).await?;
                    if let Some(status) = game.finished() {
                        announce_result(status, seat);
                        return Ok(());
                    }
                }
                Packet::Aborted { reason } => {
                    game.abort();
                    println!("Game aborted: {}", reason);
                    return Ok(());
                }
                other => warn!("Unexpected packet type: {:?}", other),
            }
        }
    }

    /// Prompts until the server accepts a column for this turn.
    async fn take_turn(&mut self, game: &mut ClientGame) -> Result<(), BoxError> {
        loop {
            let column = tokio::task::spawn_blocking(input::prompt_column).await??;

            if !game.is_column_open(column) {
                println!("Column is already full. Try again.");
                continue;
            }

            write_packet(
                &mut self.stream,
                &Packet::Move {
                    column: column as u8,
                },
            )
            .await?;

            match read_packet(&mut self.stream).await? {
                Packet::MoveAccepted {
                    row,
                    column,
                    status,
                } => {
                    game.apply_own_move(row, column, status);
                    println!("{}", render_board(game.board()));
                    if status == GameStatus::Continue {
                        println!("Waiting for the other player to move...");
                    }
                    return Ok(());
                }
                Packet::MoveRejected { column, reason } => {
                    println!("Column {} refused: {}. Try again.", column + 1, reason);
                }
                Packet::Aborted { reason } => {
                    game.abort();
                    println!("Game aborted: {}", reason);
                    return Ok(());
                }
                other => warn!("Unexpected packet type: {:?}", other),
            }
        }
    }
}

fn announce_result(status: GameStatus, seat: Token) {
    match status {
        GameStatus::FirstMoverWon | GameStatus::SecondMoverWon => {
            if status == GameStatus::won_by(seat) {
                println!("You won! ({})", seat.glyph());
            } else {
                println!("Your opponent ({}) has won!", seat.other().glyph());
            }
        }
        GameStatus::Draw => println!("Game is over, no winner!"),
        GameStatus::Continue | GameStatus::Aborted => {}
    }
}
