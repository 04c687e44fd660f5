//! Pluggable log files for anything custom the system keeps track of.
//!
//! A [`LogFormat`] decides where a log lives and how its entries are
//! parsed, created and rendered back; [`LogFile`] supplies the shared
//! read/append/clear machinery on top. The bundled format is
//! [`DunstLog`], a JSON notification history.

pub mod dunst;

pub use dunst::DunstLog;

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Malformed log contents: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LogResult<T> = Result<T, LogError>;

/// How one kind of log is stored on disk.
pub trait LogFormat {
    /// Where the log file lives.
    fn path(&self) -> &Path;

    /// Entry cap; 0 means unlimited.
    fn max_entries(&self) -> usize {
        0
    }

    /// Parse raw file contents into entries.
    fn parse(&self, contents: &str) -> LogResult<Vec<Value>>;

    /// Turn entries back into what gets stored in the file.
    fn render(&self, items: &[Value]) -> String;

    /// Build a new entry from caller-supplied pieces.
    fn entry(&self, pieces: &[&str]) -> Value;

    /// Where new entries go; appends to the back unless overridden.
    fn insert(&self, items: &mut Vec<Value>, entry: Value) {
        items.push(entry);
    }

    /// Which entry is dropped once the cap is hit; must discard the oldest
    /// one for whatever direction `insert` grows in.
    fn evict(&self, items: &mut Vec<Value>) {
        if !items.is_empty() {
            items.remove(0);
        }
    }
}

/// Shared machinery over any [`LogFormat`].
pub struct LogFile<F: LogFormat> {
    format: F,
}

impl<F: LogFormat> LogFile<F> {
    pub fn new(format: F) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    /// All entries, fully parsed. A missing or empty file reads as no
    /// entries at all.
    pub async fn all(&self) -> LogResult<Vec<Value>> {
        match self.contents().await? {
            Some(contents) => self.format.parse(&contents),
            None => Ok(Vec::new()),
        }
    }

    /// Add a new entry to the existing ones, evicting the oldest once the
    /// format's cap is exceeded.
    pub async fn append(&self, pieces: &[&str]) -> LogResult<()> {
        let entry = self.format.entry(pieces);

        let mut items = self.all().await?;
        self.format.insert(&mut items, entry);

        let max = self.format.max_entries();
        if max != 0 && items.len() > max {
            self.format.evict(&mut items);
        }

        tokio::fs::write(self.format.path(), self.format.render(&items)).await?;
        Ok(())
    }

    /// Truncate the log file.
    pub async fn clear(&self) -> LogResult<()> {
        tokio::fs::write(self.format.path(), "").await?;
        Ok(())
    }

    async fn contents(&self) -> LogResult<Option<String>> {
        let path = self.format.path();
        if !tokio::fs::try_exists(path).await? {
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(path).await?;
        if contents.is_empty() {
            return Ok(None);
        }
        Ok(Some(contents))
    }
}
