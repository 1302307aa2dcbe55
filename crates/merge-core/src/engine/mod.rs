//! Engine module: the N×N merge board and its move/terminal logic.
//!
//! - `Game` owns the grid, score, and terminal flags.
//! - `ops` holds the pure line helpers the four move directions share.
//! - All randomness comes in through `rand::Rng` parameters.

mod ops;
pub mod state;

pub use state::{Game, GameState, Move};
