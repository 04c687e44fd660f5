//! Whole-system helpers: screenshots and pending package updates.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use tokio::time::sleep;
use tracing::debug;

use crate::exec::{run_checked, run_output};
use crate::notify::{Notification, Urgency};
use crate::{clipboard, OsError, OsResult};

const SCREENSHOT_NOTIFICATION_ID: u32 = 5123;

/// Pending updates, split by repository source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Updates {
    pub pacman: Vec<String>,
    pub aur: Vec<String>,
}

impl Updates {
    pub fn total(&self) -> usize {
        self.pacman.len() + self.aur.len()
    }
}

/// Take a screenshot of whatever is on screen right now.
///
/// The image lands in `dir` under a random name, its bytes go to the
/// clipboard, and a notification with the file as its icon announces where
/// it was saved. Returns the saved path.
pub async fn screenshot(dir: &Path, delay: Duration) -> OsResult<PathBuf> {
    sleep(delay).await;

    let path = dir.join(format!("{}.png", random_name(25)));
    let target = path
        .to_str()
        .ok_or_else(|| OsError::InvalidArgument(format!("unusable path: {}", path.display())))?;

    run_checked("maim", &["--format", "png", target]).await?;
    debug!(path = %path.display(), "screenshot captured");

    let data = tokio::fs::read(&path).await?;
    clipboard::add_image(&data, "image/png").await?;

    Notification::new(SCREENSHOT_NOTIFICATION_ID)
        .appname("Screenshot")
        .summary(format!("Screenshot saved at {}", path.display()))
        .icon(target)
        .urgency(Urgency::Low)
        .send()
        .await?;

    Ok(path)
}

/// All available package updates, from pacman and the AUR.
///
/// Both helpers exit non-zero when nothing is pending, so failures read as
/// empty lists rather than errors.
pub async fn updates() -> OsResult<Updates> {
    let pacman = run_output("checkupdates", &[])
        .await
        .map(split_lines)
        .unwrap_or_default();
    let aur = run_output("yay", &["-Qua"])
        .await
        .map(split_lines)
        .unwrap_or_default();

    Ok(Updates { pacman, aur })
}

fn split_lines(output: String) -> Vec<String> {
    output.lines().map(str::to_string).collect()
}

fn random_name(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_names_have_the_requested_length() {
        let name = random_name(25);
        assert_eq!(name.len(), 25);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn random_names_differ() {
        assert_ne!(random_name(25), random_name(25));
    }

    #[test]
    fn update_lists_split_cleanly() {
        let lines = split_lines("linux 6.8 -> 6.9\nrofi 1.7 -> 1.8\n".to_string());
        assert_eq!(lines.len(), 2);

        let updates = Updates {
            pacman: lines,
            aur: vec!["yay 12 -> 13".to_string()],
        };
        assert_eq!(updates.total(), 3);
    }
}
