//! # Storage Module - Best Streak Persistence
//!
//! The only durable state bstguess keeps is the best streak. It lives in a tiny
//! key-value file so the slot can be read back on the next launch:
//!
//! ```text
//! data/
//! └── bstguess/
//!     └── streak.json   ← {"bestStreak": 7}
//! ```
//!
//! The file is read once at startup and rewritten whenever a new best is set.
//! Reads take a shared `fs2` lock and writes an exclusive one, so two game
//! windows sharing a data dir never interleave partial writes.
//!
//! A missing, empty or unreadable file reads as a best streak of 0.

use fs2::FileExt;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key of the best-streak slot.
pub const BEST_STREAK_KEY: &str = "bestStreak";

/// Errors that can arise while persisting the best streak.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

type SlotMap = BTreeMap<String, u32>;

/// Key-value slot file holding the best streak.
#[derive(Debug, Clone)]
pub struct StreakStore {
    path: PathBuf,
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

impl StreakStore {
    /// Slot file under `<data_dir>/bstguess/streak.json`.
    pub fn new(data_dir: &str) -> Self {
        Self {
            path: Path::new(data_dir).join("bstguess").join("streak.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted best streak, treating any failure as 0.
    pub fn load_best(&self) -> u32 {
        match self.read_slots() {
            Ok(slots) => {
                let best = slots.get(BEST_STREAK_KEY).copied().unwrap_or(0);
                debug!("Loaded best streak {} from {:?}", best, self.path);
                best
            }
            Err(e) => {
                warn!("streak: unable to read {:?}: {}", self.path, e);
                0
            }
        }
    }

    /// Overwrite the best streak slot.
    pub fn save_best(&self, best: u32) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            ensure_dir(dir)?;
        }
        let mut f = fs::OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.path)?;
        f.lock_exclusive()?;

        let result = (|| -> Result<(), StorageError> {
            let mut s = String::new();
            f.read_to_string(&mut s)?;
            // Keep unrelated keys; a corrupt file is simply replaced
            let mut slots: SlotMap = parse_slots(&s).unwrap_or_default();
            slots.insert(BEST_STREAK_KEY.to_string(), best);
            let data = serde_json::to_string_pretty(&slots)?;
            f.seek(SeekFrom::Start(0))?;
            f.set_len(0)?;
            f.write_all(data.as_bytes())?;
            f.flush()?;
            f.sync_all()?;
            Ok(())
        })();

        let _ = f.unlock();
        if result.is_ok() {
            debug!("Saved best streak {} to {:?}", best, self.path);
        }
        result
    }

    fn read_slots(&self) -> Result<SlotMap, StorageError> {
        let mut f = match fs::OpenOptions::new().read(true).open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SlotMap::new()),
            Err(e) => return Err(e.into()),
        };
        f.lock_shared()?;
        let mut s = String::new();
        let read = f.read_to_string(&mut s);
        let _ = f.unlock();
        read?;
        Ok(parse_slots(&s)?)
    }
}

fn parse_slots(s: &str) -> Result<SlotMap, serde_json::Error> {
    let cleaned = s.trim_start_matches('\0').trim();
    if cleaned.is_empty() {
        return Ok(SlotMap::new());
    }
    serde_json::from_str(cleaned)
}
