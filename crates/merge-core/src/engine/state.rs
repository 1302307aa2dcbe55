use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ops;
use crate::rules::Rules;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, for exhaustive scans.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Snapshot of a game, shaped for the JSON surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Vec<Vec<u32>>,
    pub score: u64,
    pub won: bool,
    pub over: bool,
    #[serde(rename = "canMove")]
    pub can_move: bool,
}

/// An N×N merge board with its score and terminal flags.
///
/// The grid is row-major; zero is an empty cell, every non-zero cell holds a
/// power of two. Tile positions are derived from the grid alone; there is no
/// side bookkeeping to drift out of sync. Every operation completes in time
/// proportional to the grid size.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    rules: Rules,
    grid: Vec<u32>,
    score: u64,
    won: bool,
    over: bool,
    can_move: bool,
}

impl Game {
    /// Start a game: seed `initial_tiles` tiles at random empty positions
    /// (fewer if the board fills first), then evaluate the terminal flags.
    ///
    /// ```
    /// use merge_core::engine::Game;
    /// use merge_core::rules::Rules;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let game = Game::new(Rules::default(), &mut rng);
    /// assert_eq!(game.count_empty(), 64 - 8);
    /// assert_eq!(game.score(), 0);
    /// ```
    pub fn new<R: Rng + ?Sized>(rules: Rules, rng: &mut R) -> Self {
        let cells = rules.size * rules.size;
        let mut game = Self {
            grid: vec![0; cells],
            score: 0,
            won: false,
            over: false,
            can_move: true,
            rules,
        };
        for _ in 0..game.rules.initial_tiles {
            if !game.spawn_tile(rng) {
                break;
            }
        }
        game.check_state();
        game
    }

    /// Rebuild a game from a known grid, re-deriving the terminal flags.
    ///
    /// `grid` is row-major and must hold exactly `size * size` cells.
    ///
    /// ```
    /// use merge_core::engine::{Game, Move};
    /// use merge_core::rules::Rules;
    ///
    /// let rules = Rules { size: 4, initial_tiles: 2, ..Rules::default() };
    /// let mut game = Game::from_grid(rules, vec![
    ///     2, 2, 4, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    /// ]);
    /// assert!(game.shift(Move::Left));
    /// assert_eq!(game.tile(0, 0), 4);
    /// assert_eq!(game.score(), 4);
    /// ```
    pub fn from_grid(rules: Rules, grid: Vec<u32>) -> Self {
        assert_eq!(
            grid.len(),
            rules.size * rules.size,
            "grid must hold size * size cells"
        );
        let mut game = Self {
            grid,
            score: 0,
            won: false,
            over: false,
            can_move: true,
            rules,
        };
        game.check_state();
        game
    }

    pub fn size(&self) -> usize {
        self.rules.size
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Value at (row, col); 0 for an empty cell.
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.grid[row * self.rules.size + col]
    }

    /// Count the number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.grid.iter().filter(|&&v| v == 0).count()
    }

    /// The highest tile value on the board (0 when empty).
    pub fn highest_tile(&self) -> u32 {
        self.grid.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values. Merges conserve it; only spawns add to it.
    pub fn tile_sum(&self) -> u64 {
        self.grid.iter().map(|&v| u64::from(v)).sum()
    }

    /// Apply a full move: slide/merge, then spawn a tile and re-evaluate the
    /// terminal flags if anything changed. Returns whether the board changed.
    ///
    /// A game that is already over, or whose last evaluation found no legal
    /// move, is left untouched.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Move, rng: &mut R) -> bool {
        if self.over || !self.can_move {
            return false;
        }
        let moved = self.shift(direction);
        if moved {
            self.spawn_tile(rng);
            self.check_state();
        }
        moved
    }

    /// Slide/merge tiles in `direction` without spawning. Returns true iff at
    /// least one cell's value changed; a false return leaves grid and score
    /// untouched.
    ///
    /// ```
    /// use merge_core::engine::{Game, Move};
    /// use merge_core::rules::Rules;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let mut game = Game::new(Rules::default(), &mut rng);
    /// let before = game.tile_sum();
    /// game.shift(Move::Left);
    /// assert_eq!(game.tile_sum(), before);
    /// ```
    pub fn shift(&mut self, direction: Move) -> bool {
        let size = self.rules.size;
        let mut moved = false;
        for line in 0..size {
            let indices = ops::line_indices(size, direction, line);
            let cells: Vec<u32> = indices.iter().map(|&idx| self.grid[idx]).collect();
            let (merged, gained) = ops::slide_line(&cells);
            self.score += gained;
            for (pos, &idx) in indices.iter().enumerate() {
                let value = merged.get(pos).copied().unwrap_or(0);
                if self.grid[idx] != value {
                    moved = true;
                }
                self.grid[idx] = value;
            }
        }
        moved
    }

    /// Place one tile (2, or 4 with the configured probability) on a random
    /// empty cell. Returns false when the board is full.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let empty: Vec<usize> = self
            .grid
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(idx, _)| idx)
            .collect();
        if empty.is_empty() {
            return false;
        }
        let slot = empty[rng.gen_range(0..empty.len())];
        self.grid[slot] = if rng.gen_bool(self.rules.four_chance) {
            4
        } else {
            2
        };
        true
    }

    /// Snapshot the game for serialization.
    pub fn snapshot(&self) -> GameState {
        let size = self.rules.size;
        let board = (0..size)
            .map(|row| (0..size).map(|col| self.tile(row, col)).collect())
            .collect();
        GameState {
            board,
            score: self.score,
            won: self.won,
            over: self.over,
            can_move: self.can_move,
        }
    }

    /// Re-evaluate `won`, `can_move`, and `over`. `won` and `over` stick
    /// until a new game replaces this one.
    fn check_state(&mut self) {
        if self.grid.iter().any(|&v| v >= self.rules.target) {
            self.won = true;
        }
        self.can_move = self.has_move();
        if !self.can_move {
            self.over = true;
        }
    }

    /// A move exists iff some cell is empty or two neighbors hold equal
    /// non-zero values.
    fn has_move(&self) -> bool {
        let size = self.rules.size;
        for row in 0..size {
            for col in 0..size {
                let value = self.tile(row, col);
                if value == 0 {
                    return true;
                }
                if row + 1 < size && value == self.tile(row + 1, col) {
                    return true;
                }
                if col + 1 < size && value == self.tile(row, col + 1) {
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.rules.size;
        for row in 0..size {
            if row > 0 {
                writeln!(f, "{}", "-".repeat(size * 8 - 1))?;
            }
            let cells: Vec<String> = (0..size)
                .map(|col| format_val(self.tile(row, col)))
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(value: u32) -> String {
    if value == 0 {
        String::from("       ")
    } else {
        format!("{value:^7}")
    }
}
