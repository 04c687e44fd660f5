//! Screen backlight control through `light`.
//!
//! Keyboard backlight is not covered; `light` only drives the screen
//! brightness here.

use crate::exec::{run_checked, run_output};
use crate::{OsError, OsResult};

/// Increase the screen brightness by a percentage.
pub async fn raise(by: u32) -> OsResult<()> {
    run_checked("light", &["-A", &by.to_string()]).await
}

/// Decrease the screen brightness by a percentage.
pub async fn lower(by: u32) -> OsResult<()> {
    run_checked("light", &["-U", &by.to_string()]).await
}

/// Current screen brightness level, in percent.
pub async fn screen_level() -> OsResult<f32> {
    let output = run_output("light", &["-G"]).await?;
    output
        .trim()
        .parse()
        .map_err(|_| OsError::UnexpectedOutput(format!("light -G returned {output:?}")))
}
