use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};

pub const DEFAULT_CAPACITY: usize = 5;
pub const NO_ENTRY_NAME: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u32) -> Self {
        LeaderboardEntry { name: name.to_string(), score }
    }
}

/// Where the leaderboard lives between runs.
pub trait ScoreStore {
    fn read(&self) -> Result<Vec<LeaderboardEntry>>;
    fn write(&mut self, entries: &[LeaderboardEntry]) -> Result<()>;
}

/// JSON array of `{"name": ..., "score": ...}` records, rewritten whole on
/// every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn read(&self) -> Result<Vec<LeaderboardEntry>> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| SnakeError::PersistenceRead { path: self.path.clone(), source })?;

        serde_json::from_str(&text)
            .map_err(|source| SnakeError::Corrupt { path: self.path.clone(), source })
    }

    fn write(&mut self, entries: &[LeaderboardEntry]) -> Result<()> {
        let write_err = |source: io::Error| SnakeError::PersistenceWrite { path: self.path.clone(), source };

        let text = serde_json::to_string(entries).map_err(|e| write_err(e.into()))?;
        fs::write(&self.path, text).map_err(write_err)
    }
}

/// Top scores, highest first. Equal scores keep the order they were
/// submitted in.
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    capacity: usize,
    store: Box<dyn ScoreStore>,
    persist_error: Option<SnakeError>,
}

impl Leaderboard {
    /// Reads whatever `store` holds. A missing or unreadable store gives an
    /// empty leaderboard.
    pub fn load(store: Box<dyn ScoreStore>, capacity: usize) -> Self {
        let mut entries = match store.read() {
            Ok(entries) => entries,
            Err(SnakeError::PersistenceRead { ref source, ref path })
                if source.kind() == ErrorKind::NotFound =>
            {
                info!("no leaderboard at {:?}, starting empty", path);
                vec![]
            }
            Err(e) => {
                warn!("ignoring leaderboard: {}", e);
                vec![]
            }
        };

        sort_desc(&mut entries);
        entries.truncate(capacity);

        Leaderboard { entries, capacity, store, persist_error: None }
    }

    pub fn open(path: &Path) -> Self {
        Leaderboard::load(Box::new(JsonFileStore::new(path)), DEFAULT_CAPACITY)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Best name and score, or `("None", 0)` when nobody has played yet.
    pub fn top_entry(&self) -> (&str, u32) {
        match self.entries.first() {
            Some(entry) => (entry.name.as_str(), entry.score),
            None => (NO_ENTRY_NAME, 0),
        }
    }

    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < self.capacity {
            return true;
        }
        self.entries.last().map_or(false, |last| score > last.score)
    }

    /// Records `score` if it makes the table and saves right away. Returns
    /// whether it qualified.
    ///
    /// A failed save does not roll back the in-memory table; the error is
    /// kept for [`Leaderboard::take_persist_error`].
    pub fn submit(&mut self, name: &str, score: u32) -> bool {
        if !self.qualifies(score) {
            info!("{} scored {}, not enough for the leaderboard", name, score);
            return false;
        }

        self.entries.push(LeaderboardEntry::new(name, score));
        sort_desc(&mut self.entries);
        self.entries.truncate(self.capacity);
        info!("{} enters the leaderboard with {}", name, score);

        if let Err(e) = self.store.write(&self.entries) {
            error!("{}", e);
            self.persist_error = Some(e);
        }

        true
    }

    /// Last save failure, if any, cleared once taken.
    pub fn take_persist_error(&mut self) -> Option<SnakeError> {
        self.persist_error.take()
    }
}

fn sort_desc(entries: &mut [LeaderboardEntry]) {
    // stable: ties stay in insertion order
    entries.sort_by(|a, b| b.score.cmp(&a.score));
}
