use std::sync::{Arc, Mutex};

use merge_core::engine::{Game, GameState, Move};
use merge_core::rules::Rules;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The one live game, its rules, and the process-wide spawn RNG.
///
/// The whole struct sits behind a single mutex so a request's
/// read-validate-apply-serialize sequence runs as one critical section.
pub struct SharedGame {
    rules: Rules,
    rng: StdRng,
    game: Option<Game>,
}

impl SharedGame {
    pub fn new(rules: Rules, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rules,
            rng,
            game: None,
        }
    }

    /// Snapshot the current game, creating one first if none exists.
    pub fn state(&mut self) -> GameState {
        self.ensure_game();
        self.game.as_ref().expect("game was just created").snapshot()
    }

    /// Apply a move to the current game (lazily created) and snapshot it.
    pub fn apply(&mut self, direction: Move) -> GameState {
        self.ensure_game();
        let game = self.game.as_mut().expect("game was just created");
        game.apply_move(direction, &mut self.rng);
        game.snapshot()
    }

    /// Replace the current game with a fresh one and snapshot it.
    pub fn reset(&mut self) -> GameState {
        let game = Game::new(self.rules.clone(), &mut self.rng);
        let state = game.snapshot();
        self.game = Some(game);
        state
    }

    fn ensure_game(&mut self) {
        if self.game.is_none() {
            self.game = Some(Game::new(self.rules.clone(), &mut self.rng));
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    game: Arc<Mutex<SharedGame>>,
}

impl AppState {
    pub fn new(rules: Rules, seed: Option<u64>) -> Self {
        Self {
            game: Arc::new(Mutex::new(SharedGame::new(rules, seed))),
        }
    }

    /// Run `f` with the game lock held for the whole critical section.
    pub fn with_game<T>(&self, f: impl FnOnce(&mut SharedGame) -> T) -> T {
        let mut shared = self.game.lock().expect("game lock poisoned");
        f(&mut shared)
    }
}
