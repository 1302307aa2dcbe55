//! merge2048 board engine.
//!
//! A `Game` owns an N×N grid of power-of-two tiles, a score, and the
//! terminal flags (`won`, `over`, `can_move`). Moves slide and merge tiles
//! toward one edge; a successful move spawns a fresh tile and re-evaluates
//! the terminal flags. The engine performs no I/O and reaches for no ambient
//! randomness: every randomized operation takes a caller-supplied
//! [`rand::Rng`], so front ends own their RNG and tests can seed one.
//!
//! ```
//! use merge_core::engine::{Game, Move};
//! use merge_core::rules::Rules;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut game = Game::new(Rules::default(), &mut rng);
//! game.apply_move(Move::Left, &mut rng);
//! assert_eq!(game.snapshot().board.len(), 8);
//! ```

pub mod engine;
pub mod rules;
