//! Capture volume control.

use crate::audio::{parse_muted, parse_volume};
use crate::exec::{run_checked, run_output};
use crate::{OsResult, ToggleState};

const CHANNEL: &str = "Capture";

/// Current capture volume, in percent.
pub async fn current_volume() -> OsResult<u32> {
    let data = amixer_get().await?;
    parse_volume(&data, 4)
}

/// Whether the microphone is currently capturing audio.
pub async fn is_muted() -> OsResult<bool> {
    let data = amixer_get().await?;
    parse_muted(&data, 6)
}

pub async fn set_volume(percent: u32) -> OsResult<()> {
    amixer_set(&format!("{percent}%")).await
}

pub async fn raise(by: u32) -> OsResult<()> {
    amixer_set(&format!("{by}%+")).await
}

pub async fn lower(by: u32) -> OsResult<()> {
    amixer_set(&format!("{by}%-")).await
}

/// Toggle capture, or force it to a specific state.
pub async fn toggle(state: Option<ToggleState>) -> OsResult<()> {
    match state {
        None => amixer_set("toggle").await,
        Some(ToggleState::On) => amixer_set("cap").await,
        Some(ToggleState::Off) => amixer_set("nocap").await,
    }
}

async fn amixer_get() -> OsResult<String> {
    run_output("amixer", &["get", CHANNEL]).await
}

async fn amixer_set(value: &str) -> OsResult<()> {
    run_checked("amixer", &["set", CHANNEL, value]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    // Capture lines carry one extra field before the percentage:
    // `  Front Left: Capture 26 [40%] [12.00dB] [on]`
    const STATUS: &str = "Simple mixer control 'Capture',0\n\
                          \x20 Front Left: Capture 26 [40%] [12.00dB] [on]";

    #[test]
    fn capture_volume_uses_shifted_field() {
        assert_eq!(parse_volume(STATUS, 4).unwrap(), 40);
    }

    #[test]
    fn capture_mute_uses_shifted_field() {
        assert!(!parse_muted(STATUS, 6).unwrap());
        let muted = STATUS.replace("[on]", "[off]");
        assert!(parse_muted(&muted, 6).unwrap());
    }
}
