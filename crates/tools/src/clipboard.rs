//! Clipboard access through `xclip`.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::exec::run_output;
use crate::{OsError, OsResult};

/// Put text or raw bytes on the clipboard.
pub async fn add(data: &[u8]) -> OsResult<()> {
    write_clipboard(data, None).await
}

/// Put image data on the clipboard under an explicit mime type.
pub async fn add_image(data: &[u8], format: &str) -> OsResult<()> {
    write_clipboard(data, Some(format)).await
}

/// Current clipboard contents.
pub async fn get() -> OsResult<String> {
    run_output("xclip", &["-selection", "clipboard", "-o"]).await
}

/// Clear the clipboard.
pub async fn clear() -> OsResult<()> {
    write_clipboard(b"", None).await
}

async fn write_clipboard(data: &[u8], mime: Option<&str>) -> OsResult<()> {
    let mut command = Command::new("xclip");
    command.args(["-selection", "clipboard"]);
    if let Some(mime) = mime {
        command.args(["-t", mime]);
    }

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(data).await?;
    }

    let status = child.wait().await?;
    if !status.success() {
        return Err(OsError::OperationFailed(
            "xclip exited with failure".to_string(),
        ));
    }

    Ok(())
}
