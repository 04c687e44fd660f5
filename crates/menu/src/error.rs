use thiserror::Error;

/// Picker orchestration errors.
///
/// Races with a picker the user already closed are swallowed inside the
/// lifecycle calls and never surface here.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to spawn picker: {0}")]
    Spawn(String),

    #[error("Handoff protocol violation: {0}")]
    Protocol(String),

    #[error("No selection arrived within the configured bound")]
    ResultTimeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MenuResult<T> = Result<T, MenuError>;
