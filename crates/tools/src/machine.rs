//! Machine-level power control: systemctl, slock, bspwm.

use tokio::process::Command;

use crate::exec::run_checked;
use crate::OsResult;

/// Power the machine off.
pub async fn off() -> OsResult<()> {
    run_checked("systemctl", &["poweroff"]).await
}

/// Reboot the machine.
pub async fn reboot() -> OsResult<()> {
    run_checked("systemctl", &["reboot"]).await
}

/// Suspend the machine.
///
/// The locker has to be up before the machine goes down, so it is started
/// detached first and keeps running across the sleep.
pub async fn suspend() -> OsResult<()> {
    Command::new("slock").spawn()?;
    run_checked("systemctl", &["suspend"]).await
}

/// Lock the screen; returns once the user unlocks it.
pub async fn lock() -> OsResult<()> {
    run_checked("slock", &[]).await
}

/// Log the current user out by quitting the window manager.
pub async fn logout() -> OsResult<()> {
    run_checked("bspc", &["quit"]).await
}
