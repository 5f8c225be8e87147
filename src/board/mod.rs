pub mod cozy;
pub mod moves;

pub use cozy::{Applied, GameStatus, Position};
pub use moves::Move;
