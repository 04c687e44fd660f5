//! Wrappers around the desktop utilities katana scripts lean on.
//!
//! Every module exposes the same API shape regardless of the underlying
//! binary, so scripts never depend on which tool actually produced the
//! data:
//! - audio / microphone (amixer, pactl)
//! - backlight (light)
//! - wifi (nmcli)
//! - clipboard (xclip)
//! - notifications (dunstify)
//! - system (maim screenshots, package updates)
//! - machine (systemctl power control, slock, bspwm logout)

pub mod audio;
pub mod backlight;
pub mod clipboard;
pub mod machine;
pub mod microphone;
pub mod notify;
pub mod system;
pub mod wifi;

pub(crate) mod exec;

/// Desktop utility error types
#[derive(Debug, thiserror::Error)]
pub enum OsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Unexpected output: {0}")]
    UnexpectedOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OsResult<T> = Result<T, OsError>;

/// Explicit target state for the audio and microphone toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    On,
    Off,
}
