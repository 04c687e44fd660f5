//! The menu life-cycle: show, loading toggle, value, destroy.

use std::io::Write;
use std::os::fd::OwnedFd;
use std::os::unix::net::UnixStream as StdUnixStream;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::command::build_command;
use crate::config::{MenuConfig, MenuSettings, TimeoutPolicy};
use crate::error::{MenuError, MenuResult};

/// Message shown while a placeholder menu is up.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Everything the orchestrator tracks for one live picker.
///
/// Written by both the show path and the timeout path, so it lives behind
/// the instance mutex as a unit.
#[derive(Default)]
struct ProcessHandle {
    /// Supervisor flow; only alive between spawn and the display floor.
    supervisor: Option<JoinHandle<()>>,
    /// Pid of the picker the user actually sees.
    picker: Option<u32>,
    /// Caller end of the channel, positioned after the handoff frame.
    channel: Option<BufReader<UnixStream>>,
    /// Whether the current display is the loading placeholder.
    placeholder: bool,
}

/// One interactive picker instance.
///
/// Owns its channel and both tracked process roles exclusively; no two
/// instances share state. At most one picker is live per instance at any
/// time: every transition fully tears down the previous one first.
pub struct Menu {
    config: MenuConfig,
    settings: MenuSettings,
    handle: Mutex<ProcessHandle>,
}

impl Menu {
    pub fn new(config: MenuConfig, settings: MenuSettings) -> Self {
        Self {
            config,
            settings,
            handle: Mutex::new(ProcessHandle::default()),
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Pid of the currently shown picker, if any.
    pub async fn pid(&self) -> Option<u32> {
        self.handle.lock().await.picker
    }

    /// Launch the picker with the configured lines.
    ///
    /// Returns once the picker's pid is known and the minimum display floor
    /// has elapsed; the caller is free to do heavier work while the menu is
    /// on screen and collect the selection later through [`Menu::value`].
    pub async fn show(&self) -> MenuResult<&Self> {
        self.show_message(None).await
    }

    /// Launch the picker with an explicit message instead of the
    /// configured lines.
    pub async fn show_message(&self, message: Option<&str>) -> MenuResult<&Self> {
        let mut handle = self.handle.lock().await;

        // Single live picker per instance.
        Self::kill_fork_locked(&mut handle);
        Self::kill_picker_locked(&mut handle);

        // The channel exists before any process does. One end stays here,
        // the other moves into the supervisor flow together with a clone
        // reserved for the handoff frame.
        let (ours, theirs) = StdUnixStream::pair()?;
        ours.set_nonblocking(true)?;
        let channel = UnixStream::from_std(ours)?;
        let mut handoff = theirs.try_clone()?;

        let argv = build_command(&self.config, handle.placeholder, &self.settings);
        let program = self.settings.program.clone();
        let mut content = match message {
            Some(text) => text.to_string(),
            None => self.config.joined_lines(),
        };
        content.push('\n');

        let supervisor = tokio::spawn(async move {
            // Dropping both channel ends without a handoff frame is how a
            // failed spawn reaches the caller.
            let stdout: Stdio = OwnedFd::from(theirs).into();
            let spawned = Command::new(&program)
                .args(&argv)
                .stdin(Stdio::piped())
                .stdout(stdout)
                .spawn();
            let mut picker = match spawned {
                Ok(child) => child,
                Err(e) => {
                    warn!(program = %program, error = %e, "picker spawn failed");
                    return;
                }
            };
            let pid = picker.id().unwrap_or_default();

            // The picker is attached to the pipe before any content is
            // written; dropping stdin afterwards closes the stream.
            if let Some(mut stdin) = picker.stdin.take() {
                if let Err(e) = stdin.write_all(content.as_bytes()).await {
                    // Expected when the picker exits before reading.
                    debug!(pid, error = %e, "picker stdin write failed");
                }
            }

            // A frame this small always fits the socket buffer, so the
            // blocking write cannot stall the runtime. Keeping the clone in
            // blocking mode matters: it shares its file description with
            // the picker's stdout. The picker also shares the socket, but
            // it emits nothing until the user makes a selection, so the
            // frame is always the first line on the channel.
            if let Err(e) = handoff.write_all(format!("{pid}\n").as_bytes()) {
                warn!(pid, error = %e, "handoff frame write failed");
            }
            drop(handoff);

            // Reap the picker whenever it exits so no defunct entry stays
            // in the process table.
            let _ = picker.wait().await;
        });

        let mut channel = BufReader::new(channel);
        let mut frame = String::new();
        let received = timeout(self.settings.handoff_timeout, channel.read_line(&mut frame)).await;

        let pid = match received {
            Err(_) => {
                supervisor.abort();
                return Err(MenuError::Protocol(
                    "handoff frame not received within bound".to_string(),
                ));
            }
            Ok(Err(e)) => {
                supervisor.abort();
                return Err(MenuError::Io(e));
            }
            Ok(Ok(0)) => {
                supervisor.abort();
                return Err(MenuError::Spawn(format!(
                    "picker '{}' could not be started",
                    self.settings.program
                )));
            }
            Ok(Ok(_)) => match frame.trim().parse::<u32>() {
                Ok(0) | Err(_) => {
                    supervisor.abort();
                    return Err(MenuError::Protocol(format!(
                        "malformed handoff frame: {:?}",
                        frame.trim()
                    )));
                }
                Ok(pid) => pid,
            },
        };

        debug!(pid, "picker handoff complete");
        handle.supervisor = Some(supervisor);
        handle.picker = Some(pid);
        handle.channel = Some(channel);
        drop(handle);

        // The supervisor's only job is done, but give the picker the
        // minimum display floor before tearing the flow down. The picker
        // itself is not touched here.
        sleep(self.settings.min_display).await;
        self.kill_fork().await;

        Ok(self)
    }

    /// Toggle the loading placeholder.
    ///
    /// `true` replaces whatever is showing with a placeholder menu carrying
    /// the same styling; `false` replaces the placeholder with the real
    /// configured content. The previous picker is fully torn down before
    /// the next one starts.
    pub async fn loading(&self, on: bool) -> MenuResult<&Self> {
        self.handle.lock().await.placeholder = on;
        self.destroy().await;

        if on {
            self.show_message(Some(LOADING_MESSAGE)).await
        } else {
            self.show_message(None).await
        }
    }

    /// Block until the user picks a value from the visible menu.
    ///
    /// Returns an empty string when nothing was ever shown, or when the
    /// picker exits without a choice (escape). If no selection arrives
    /// within the configured bound, both tracked processes are destroyed
    /// and the instance acts per its [`TimeoutPolicy`].
    pub async fn value(&self) -> MenuResult<String> {
        let mut channel = {
            let mut handle = self.handle.lock().await;
            match handle.channel.take() {
                Some(channel) => channel,
                None => return Ok(String::new()),
            }
        };

        let mut raw = Vec::new();
        tokio::select! {
            read = channel.read_to_end(&mut raw) => {
                read?;
                Ok(collapse_whitespace(&String::from_utf8_lossy(&raw)))
            }
            _ = sleep(self.settings.value_timeout) => {
                warn!(
                    bound = ?self.settings.value_timeout,
                    "no selection within bound, destroying picker"
                );
                self.destroy().await;
                match self.settings.on_timeout {
                    TimeoutPolicy::ExitProcess => std::process::exit(1),
                    TimeoutPolicy::Fail => Err(MenuError::ResultTimeout),
                }
            }
        }
    }

    /// Tear down both tracked roles. Safe from any state and idempotent:
    /// a second call in any state is a no-op.
    pub async fn destroy(&self) {
        let mut handle = self.handle.lock().await;
        Self::kill_fork_locked(&mut handle);
        Self::kill_picker_locked(&mut handle);
    }

    /// Tear down the supervisor flow only, leaving the picker alive.
    ///
    /// Useful when the calling script wants to finish early without
    /// waiting for a selection.
    pub async fn kill_fork(&self) {
        let mut handle = self.handle.lock().await;
        Self::kill_fork_locked(&mut handle);
    }

    /// Interrupt the picker process, if one is recorded.
    pub async fn kill_picker(&self) {
        let mut handle = self.handle.lock().await;
        Self::kill_picker_locked(&mut handle);
    }

    fn kill_fork_locked(handle: &mut ProcessHandle) {
        if let Some(supervisor) = handle.supervisor.take() {
            supervisor.abort();
        }
    }

    fn kill_picker_locked(handle: &mut ProcessHandle) {
        handle.channel = None;

        let Some(pid) = handle.picker.take() else {
            return;
        };

        let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGINT) };
        if rc == -1 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::ESRCH) {
                // The user already closed the picker; expected race.
                debug!(pid, "picker already gone");
            } else {
                warn!(pid, error = %err, "failed to interrupt picker");
            }
        }
    }
}

/// Collapse internal whitespace runs to single spaces and strip
/// surrounding terminators.
pub(crate) fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_squeezes_runs_and_strips_terminators() {
        assert_eq!(collapse_whitespace("alpha   beta\n"), "alpha beta");
        assert_eq!(collapse_whitespace("  one\ttwo  three\n\n"), "one two three");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("\n"), "");
    }
}
