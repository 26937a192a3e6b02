//! # Connect Four Game Server Library
//!
//! This library provides the authoritative server implementation for
//! networked Connect Four. It pairs incoming connections into sessions,
//! runs one game engine per session, and relays validated moves between
//! the two endpoints of each game.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Game State
//! The server owns the only real board of every game. Clients propose
//! columns; the server validates them, computes where the token lands,
//! and tells both sides what actually happened. A client-supplied row is
//! never part of the protocol.
//!
//! ### Session Pairing
//! The listener accepts connections and seats them: two endpoints asking
//! for a human opponent are paired first-come, first-served, while an
//! endpoint asking for the computer opponent starts its session
//! immediately against the server-hosted random player.
//!
//! ### Turn Serialization
//! Each session runs on its own task and services its two endpoints
//! strictly alternately. The board is owned by that task alone, so no
//! locking is needed anywhere in the game path: out-of-order and
//! concurrent moves are impossible by construction.
//!
//! ## Module Organization
//!
//! - [`connection`]: framed packet I/O over one TCP endpoint, with
//!   optional read timeouts.
//! - [`listener`]: accept loop, `Join` handshake, seat assignment, and
//!   session spawning.
//! - [`players`]: the two endpoint variants (remote human, random
//!   computer) behind one move-proposal capability.
//! - [`session`]: the per-game coordinator with the turn loop, rejection
//!   retries, move relay, and terminal/abort handling.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::listener::Listener;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Bind, then accept and pair players until shut down. Sessions
//!     // abort if a player takes more than two minutes over a move.
//!     let listener = Listener::bind("127.0.0.1:8080", Some(Duration::from_secs(120))).await?;
//!     listener.run().await?;
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod listener;
pub mod players;
pub mod session;
