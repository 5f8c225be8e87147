//! Tunable engine settings.
//!
//! Defaults reproduce the hand-tuned constants the engine ships with. Every
//! struct deserializes with `#[serde(default)]`, so a JSON file only needs the
//! fields it overrides.

use crate::error::ConfigError;
use cozy_chess::Piece;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard ceiling on search depth; there is no time-based cutoff.
pub const MAX_SEARCH_DEPTH: u32 = 4;

/// Nodes with more legal moves than this are ranked by the move orderer.
pub const ORDER_THRESHOLD: usize = 6;

pub const CHECK_BONUS: i32 = 500;
pub const MOBILITY_WEIGHT: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialValues {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
}

impl Default for MaterialValues {
    fn default() -> Self {
        Self { pawn: 100, knight: 320, bishop: 330, rook: 500, queen: 900, king: 20000 }
    }
}

impl MaterialValues {
    #[inline]
    pub fn value(&self, piece: Piece) -> i32 {
        match piece {
            Piece::Pawn => self.pawn,
            Piece::Knight => self.knight,
            Piece::Bishop => self.bishop,
            Piece::Rook => self.rook,
            Piece::Queen => self.queen,
            Piece::King => self.king,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub material: MaterialValues,
    /// Centipawns per legal move of the side to move.
    pub mobility_weight: i32,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { material: MaterialValues::default(), mobility_weight: MOBILITY_WEIGHT }
    }
}

/// How a node's move list is arranged before it is searched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Rank with the move orderer at the root and at wide nodes.
    #[default]
    Heuristic,
    /// Rules-engine generation order everywhere.
    Generation,
    /// Reverse generation order everywhere.
    Reversed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: u32,
    pub order_threshold: usize,
    pub check_bonus: i32,
    pub ordering: OrderingPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_SEARCH_DEPTH,
            order_threshold: ORDER_THRESHOLD,
            check_bonus: CHECK_BONUS,
            ordering: OrderingPolicy::Heuristic,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub eval: EvalConfig,
    pub search: SearchConfig,
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{"eval": {"mobility_weight": 3}, "search": {"ordering": "reversed"}}"#).unwrap();
        assert_eq!(cfg.eval.mobility_weight, 3);
        assert_eq!(cfg.eval.material, MaterialValues::default());
        assert_eq!(cfg.search.ordering, OrderingPolicy::Reversed);
        assert_eq!(cfg.search.max_depth, MAX_SEARCH_DEPTH);
    }
}
