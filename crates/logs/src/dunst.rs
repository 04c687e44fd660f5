//! Notification history as dunst scripts hand it over.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::{json, Value};

use crate::{LogError, LogFormat, LogResult};

/// JSON notification log, `{"notifications": [...]}` with the newest
/// entry first.
pub struct DunstLog {
    path: PathBuf,
    max: usize,
}

impl DunstLog {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("/tmp/dunstlog"),
            max: 0,
        }
    }

    /// Same format, custom location.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max: 0,
        }
    }

    /// Keep at most `max` entries, discarding the oldest past that.
    pub fn capped(mut self, max: usize) -> Self {
        self.max = max;
        self
    }
}

impl Default for DunstLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFormat for DunstLog {
    fn path(&self) -> &Path {
        &self.path
    }

    fn max_entries(&self) -> usize {
        self.max
    }

    fn parse(&self, contents: &str) -> LogResult<Vec<Value>> {
        let json: Value =
            serde_json::from_str(contents).map_err(|e| LogError::Malformed(e.to_string()))?;
        Ok(json
            .get("notifications")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    fn render(&self, items: &[Value]) -> String {
        json!({ "notifications": items }).to_string()
    }

    /// Pieces arrive in dunst script order: appname, summary, body, icon,
    /// urgency. Whitespace runs are collapsed so multi-line bodies stay a
    /// single field.
    fn entry(&self, pieces: &[&str]) -> Value {
        let clean = |index: usize| -> String {
            pieces
                .get(index)
                .map(|p| p.split_whitespace().collect::<Vec<&str>>().join(" "))
                .unwrap_or_default()
        };

        json!({
            "appname": clean(0),
            "summary": clean(1),
            "body": clean(2),
            "icon": clean(3),
            "urgency": clean(4),
            "timestamp": Local::now().format("%I:%M %p").to_string(),
        })
    }

    fn insert(&self, items: &mut Vec<Value>, entry: Value) {
        items.insert(0, entry);
    }

    fn evict(&self, items: &mut Vec<Value>) {
        // Newest first, so the oldest entry sits at the back.
        items.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFile;
    use tempfile::TempDir;

    fn log_in(dir: &TempDir) -> LogFile<DunstLog> {
        LogFile::new(DunstLog::at(dir.path().join("dunstlog")))
    }

    #[tokio::test]
    async fn entries_are_prepended() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);

        log.append(&["Mail", "new message", "hi", "mail-icon", "normal"])
            .await
            .unwrap();
        log.append(&["Volume", "40%", "", "audio-icon", "low"])
            .await
            .unwrap();

        let items = log.all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["appname"], "Volume");
        assert_eq!(items[1]["appname"], "Mail");
    }

    #[tokio::test]
    async fn bodies_are_whitespace_collapsed() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);

        log.append(&["App", "sum", "line one\nline   two", "", "low"])
            .await
            .unwrap();

        let items = log.all().await.unwrap();
        assert_eq!(items[0]["body"], "line one line two");
        assert!(items[0]["timestamp"].as_str().unwrap().contains(':'));
    }

    #[tokio::test]
    async fn missing_pieces_become_empty_fields() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);

        log.append(&["App"]).await.unwrap();

        let items = log.all().await.unwrap();
        assert_eq!(items[0]["summary"], "");
        assert_eq!(items[0]["urgency"], "");
    }

    #[tokio::test]
    async fn cap_drops_the_oldest_prepended_entry() {
        let dir = TempDir::new().unwrap();
        let log = LogFile::new(DunstLog::at(dir.path().join("dunstlog")).capped(2));

        log.append(&["First"]).await.unwrap();
        log.append(&["Second"]).await.unwrap();
        log.append(&["Third"]).await.unwrap();

        let items = log.all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["appname"], "Third");
        assert_eq!(items[1]["appname"], "Second");
    }

    #[test]
    fn parse_tolerates_a_missing_array() {
        let dunst = DunstLog::new();
        assert!(dunst.parse("{}").unwrap().is_empty());
        assert!(dunst.parse("not json").is_err());
    }

    #[test]
    fn render_round_trips_through_parse() {
        let dunst = DunstLog::new();
        let items = vec![json!({"appname": "App"})];
        let rendered = dunst.render(&items);
        assert_eq!(dunst.parse(&rendered).unwrap(), items);
    }
}
