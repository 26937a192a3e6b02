pub mod board;
pub mod engine;
pub mod protocol;
pub mod win;
pub mod wire;

pub use board::{Board, OutOfRange, Token, COLS, CONNECT, ROWS};
pub use engine::{GameEngine, GameStatus, MoveError};
pub use protocol::{OpponentKind, Packet, PROTOCOL_VERSION};
pub use win::has_connect_four;
