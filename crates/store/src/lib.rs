//! Best-score persistence
//!
//! Each game keeps one scalar (best score, high score, best level) in a
//! string key-value store, stored as a decimal string. A missing or malformed
//! value reads as zero; reading never fails.

use std::path::PathBuf;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Fixed keys, one per game
pub mod keys {
    pub const BEST_SCORE_2048: &str = "bestScore2048";
    pub const SNAKE_HIGH_SCORE: &str = "snakeHighScore";
    pub const SIMON_BEST_LEVEL: &str = "simonBestLevel";

    pub const ALL: [&str; 3] = [BEST_SCORE_2048, SNAKE_HIGH_SCORE, SIMON_BEST_LEVEL];
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode scores: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store holding persisted scalars
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read the stored best for `key`
///
/// Missing keys read as 0. Values that are not a plain decimal number also
/// read as 0 and log a warning.
///
/// ```
/// use arcade_store::{keys, load_best, record_best, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// assert_eq!(load_best(&store, keys::BEST_SCORE_2048), 0);
///
/// assert!(record_best(&mut store, keys::BEST_SCORE_2048, 2048).unwrap());
/// assert!(!record_best(&mut store, keys::BEST_SCORE_2048, 512).unwrap());
/// assert_eq!(load_best(&store, keys::BEST_SCORE_2048), 2048);
/// ```
pub fn load_best<S: ScoreStore + ?Sized>(store: &S, key: &str) -> u64 {
    let Some(raw) = store.get(key) else {
        return 0;
    };
    match raw.trim().parse::<u64>() {
        Ok(value) => value,
        Err(err) => {
            log::warn!("ignoring malformed value {raw:?} for {key}: {err}");
            0
        }
    }
}

/// Store `value` under `key` if it beats the stored best
///
/// Returns whether anything was written.
pub fn record_best<S: ScoreStore + ?Sized>(
    store: &mut S,
    key: &str,
    value: u64,
) -> Result<bool, StoreError> {
    if value <= load_best(store, key) {
        return Ok(false);
    }
    store.set(key, &value.to_string())?;
    log::debug!("new best for {key}: {value}");
    Ok(true)
}
