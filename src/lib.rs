//! Grid snake engine and top-five leaderboard.
//!
//! Everything here is independent of how the game is drawn: a host calls
//! [`Session::tick`] on a fixed schedule, forwards directional input, and reads
//! the session back to render it.

pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod leaderboard;
pub mod scheduler;
pub mod session;
pub mod snake;

pub type Coord = i32;
pub type Coords = (Coord, Coord);

pub use config::{Board, GameConfig};
pub use engine::{advance, Step};
pub use error::{Result, SnakeError};
pub use leaderboard::{JsonFileStore, Leaderboard, LeaderboardEntry, ScoreStore};
pub use scheduler::Ticker;
pub use session::{EndReason, GameOutcome, Session, SessionState};
pub use snake::{Direction, Snake};
