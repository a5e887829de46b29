// Library exports for the gomoku engine
// This allows the replay tool and the self-play binary to share the core engine

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod heuristic;
pub mod movegen;
pub mod replay;
pub mod selfplay;
pub mod simple_profiler;
pub mod types;

pub use board::Board;
pub use bot::{Bot, DecisionKind, MoveResult};
pub use config::Config;
pub use types::{GameError, Move, Player, BOARD_SIZE, WIN_LENGTH};
