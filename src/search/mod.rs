pub mod alphabeta;
pub mod eval;
pub mod minimax;
pub mod order;
pub mod pst;
pub mod select;

pub use alphabeta::{SearchStats, Searcher, Window};
pub use eval::{Evaluator, DRAW_SCORE, MATE_SCORE, SCORE_INFINITE};
pub use order::{MoveOrderer, ScoredMove};
pub use select::SearchResult;
