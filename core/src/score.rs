use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub const SNAKE_HIGH_SCORE_KEY: &str = "snakeHighScore";
pub const TETRIS_HIGH_SCORE_KEY: &str = "tetrisHighScore";

/// Persistence seam for the single best score each game keeps.
pub trait HighScoreStore {
    /// Stored best for `key`, 0 when nothing was saved yet.
    fn load_high_score(&self, key: &str) -> u32;

    fn save_high_score(&mut self, key: &str, score: u32);
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn load_high_score(&self, key: &str) -> u32 {
        (**self).load_high_score(key)
    }

    fn save_high_score(&mut self, key: &str, score: u32) {
        (**self).save_high_score(key, score)
    }
}

/// In-memory store, used headless and in tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryScores {
    scores: BTreeMap<String, u32>,
}

impl MemoryScores {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryScores {
    fn load_high_score(&self, key: &str) -> u32 {
        self.scores.get(key).copied().unwrap_or(0)
    }

    fn save_high_score(&mut self, key: &str, score: u32) {
        self.scores.insert(key.to_string(), score);
    }
}

/// Caches the best score for one key and writes through only on a strict improvement.
#[derive(Clone, Debug)]
pub struct Scoreboard<S> {
    store: S,
    key: &'static str,
    best: u32,
}

impl<S: HighScoreStore> Scoreboard<S> {
    pub fn load(store: S, key: &'static str) -> Self {
        let best = store.load_high_score(key);
        log::debug!("loaded high score {} = {}", key, best);
        Self { store, key, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Returns whether `score` became the new best.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        log::debug!("new high score {} = {}", self.key, score);
        self.best = score;
        self.store.save_high_score(self.key, score);
        true
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_as_zero() {
        let store = MemoryScores::new();

        assert_eq!(store.load_high_score(SNAKE_HIGH_SCORE_KEY), 0);
    }

    #[test]
    fn submit_only_writes_strict_improvements() {
        let mut store = MemoryScores::new();
        store.save_high_score(TETRIS_HIGH_SCORE_KEY, 300);
        let mut board = Scoreboard::load(store, TETRIS_HIGH_SCORE_KEY);

        assert_eq!(board.best(), 300);
        assert!(!board.submit(200));
        assert!(!board.submit(300));
        assert!(board.submit(400));

        let store = board.into_store();
        assert_eq!(store.load_high_score(TETRIS_HIGH_SCORE_KEY), 400);
        assert_eq!(store.load_high_score(SNAKE_HIGH_SCORE_KEY), 0);
    }

    #[test]
    fn scoreboard_can_borrow_its_store() {
        let mut store = MemoryScores::new();
        {
            let mut board = Scoreboard::load(&mut store, SNAKE_HIGH_SCORE_KEY);
            assert!(board.submit(3));
        }

        assert_eq!(store.load_high_score(SNAKE_HIGH_SCORE_KEY), 3);
    }
}
