//! Fixed-depth alpha-beta chess search on top of cozy-chess.
pub mod board;
pub mod config;
pub mod error;
pub mod perft;
pub mod search;
pub mod selfplay;
pub mod uci;

pub use board::{GameStatus, Move, Position};
pub use config::{EngineConfig, EvalConfig, OrderingPolicy, SearchConfig};
pub use error::{ConfigError, PositionError};
pub use search::{Evaluator, MoveOrderer, SearchResult, Searcher};
