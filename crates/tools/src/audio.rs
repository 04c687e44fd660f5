//! Output volume control on the active sink.
//!
//! The sink is looked up per call because bluetooth devices get a fresh
//! sink index every time they connect; the integrated speakers and the
//! headphone jack stay on sink 0.

use tracing::debug;

use crate::exec::{run_checked, run_output};
use crate::{OsError, OsResult, ToggleState};

const CHANNEL: &str = "Master";

/// Index of the sink pactl reports as RUNNING, falling back to the
/// integrated sink 0 when nothing is actively playing.
pub async fn current_sink() -> OsResult<u32> {
    let output = run_output("pactl", &["list", "sinks", "short"]).await?;
    Ok(parse_running_sink(&output))
}

/// Current volume on the master channel, in percent.
pub async fn current_volume() -> OsResult<u32> {
    let data = amixer_get().await?;
    parse_volume(&data, 3)
}

/// Whether the headphone jack is the active port.
pub async fn using_headphones() -> OsResult<bool> {
    let output = run_output("pactl", &["list", "sinks"]).await?;
    Ok(output
        .lines()
        .filter(|line| line.contains("Active Port"))
        .any(|line| line.contains("headphones")))
}

pub async fn is_muted() -> OsResult<bool> {
    let data = amixer_get().await?;
    parse_muted(&data, 5)
}

/// Set the volume to a specific value, in percent.
pub async fn set_volume(percent: u32) -> OsResult<()> {
    amixer_set(&format!("{percent}%")).await
}

pub async fn raise(by: u32) -> OsResult<()> {
    amixer_set(&format!("{by}%+")).await
}

pub async fn lower(by: u32) -> OsResult<()> {
    amixer_set(&format!("{by}%-")).await
}

/// Toggle the volume on or off, or force a specific state.
///
/// Unmuting also unmutes the downstream channels amixer leaves off after
/// a hard mute, so sound actually comes back.
pub async fn toggle(state: Option<ToggleState>) -> OsResult<()> {
    let state = match state {
        Some(state) => state,
        // If it's muted we want to do the opposite.
        None => {
            if is_muted().await? {
                ToggleState::On
            } else {
                ToggleState::Off
            }
        }
    };
    debug!(?state, "toggling master channel");

    match state {
        ToggleState::On => {
            amixer_set("unmute").await?;
            for channel in ["Headphone", "Speaker", "Bass Speaker"] {
                // Not every card exposes all of these.
                let _ = set_channel(channel, "unmute").await;
            }
            Ok(())
        }
        ToggleState::Off => amixer_set("mute").await,
    }
}

async fn amixer_get() -> OsResult<String> {
    let sink = current_sink().await?.to_string();
    run_output("amixer", &["-c", &sink, "get", CHANNEL]).await
}

async fn amixer_set(value: &str) -> OsResult<()> {
    let sink = current_sink().await?.to_string();
    run_checked("amixer", &["-c", &sink, "set", CHANNEL, value]).await
}

async fn set_channel(channel: &str, value: &str) -> OsResult<()> {
    let sink = current_sink().await?.to_string();
    run_checked("amixer", &["-c", &sink, "set", channel, value]).await
}

fn parse_running_sink(output: &str) -> u32 {
    output
        .lines()
        .find(|line| line.contains("RUNNING"))
        .and_then(|line| line.split_whitespace().next())
        .and_then(|index| index.parse().ok())
        .unwrap_or(0)
}

/// Pull the percentage out of the last amixer status line, e.g.
/// `  Mono: Playback 87 [87%] [-8.25dB] [on]`.
pub(crate) fn parse_volume(data: &str, field: usize) -> OsResult<u32> {
    let line = last_line(data)?;
    let value = line
        .split_whitespace()
        .nth(field)
        .ok_or_else(|| OsError::UnexpectedOutput(format!("short amixer line: {line:?}")))?;
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .parse()
        .map_err(|_| OsError::UnexpectedOutput(format!("no volume in field: {value:?}")))
}

pub(crate) fn parse_muted(data: &str, field: usize) -> OsResult<bool> {
    let line = last_line(data)?;
    let value = line
        .split_whitespace()
        .nth(field)
        .ok_or_else(|| OsError::UnexpectedOutput(format!("short amixer line: {line:?}")))?;
    let status: String = value.chars().filter(|c| c.is_ascii_lowercase()).collect();
    Ok(status == "off")
}

fn last_line(data: &str) -> OsResult<&str> {
    data.lines()
        .last()
        .ok_or_else(|| OsError::UnexpectedOutput("empty amixer output".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "Simple mixer control 'Master',0\n\
                          \x20 Capabilities: pvolume pswitch\n\
                          \x20 Playback channels: Mono\n\
                          \x20 Limits: Playback 0 - 87\n\
                          \x20 Mono: Playback 62 [71%] [-18.75dB] [on]";

    #[test]
    fn volume_comes_from_the_last_status_line() {
        assert_eq!(parse_volume(STATUS, 3).unwrap(), 71);
    }

    #[test]
    fn mute_flag_comes_from_the_last_status_line() {
        assert!(!parse_muted(STATUS, 5).unwrap());
        let muted = STATUS.replace("[on]", "[off]");
        assert!(parse_muted(&muted, 5).unwrap());
    }

    #[test]
    fn running_sink_index_is_parsed() {
        let short = "0\talsa_output.pci.analog-stereo\tmodule-alsa-card.c\ts16le\tSUSPENDED\n\
                     7\tbluez_output.AA_BB\tmodule-bluez5-device.c\ts16le\tRUNNING";
        assert_eq!(parse_running_sink(short), 7);
    }

    #[test]
    fn idle_sinks_fall_back_to_zero() {
        let short = "0\talsa_output.pci.analog-stereo\tmodule-alsa-card.c\ts16le\tSUSPENDED";
        assert_eq!(parse_running_sink(short), 0);
        assert_eq!(parse_running_sink(""), 0);
    }

    #[test]
    fn garbage_output_is_reported() {
        assert!(parse_volume("Mono: Playback", 3).is_err());
        assert!(parse_volume("", 3).is_err());
    }
}
