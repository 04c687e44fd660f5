//! Shared command execution helpers.

use tokio::process::Command;

use crate::{OsError, OsResult};

pub async fn run_checked(command: &str, args: &[&str]) -> OsResult<()> {
    let output = Command::new(command).args(args).output().await?;
    if output.status.success() {
        return Ok(());
    }
    Err(OsError::OperationFailed(
        String::from_utf8_lossy(&output.stderr).to_string(),
    ))
}

pub async fn run_output(command: &str, args: &[&str]) -> OsResult<String> {
    let output = Command::new(command).args(args).output().await?;
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).to_string());
    }
    Err(OsError::OperationFailed(
        String::from_utf8_lossy(&output.stderr).to_string(),
    ))
}
