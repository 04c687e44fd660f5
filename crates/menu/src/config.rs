//! Menu descriptions and orchestration settings.

use std::path::PathBuf;
use std::time::Duration;

/// Which invocation mode the picker starts in when nothing is loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Caller-provided lines through dmenu mode.
    Custom,
    /// The picker's own application launcher mode.
    Default,
}

/// Marks a line as highlighted when it is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Active,
    Urgent,
}

/// Immutable-after-build description of what the picker displays.
///
/// Built through consuming `with_*` calls and handed to
/// [`Menu`](crate::Menu) as a value, so a showing menu can never be
/// reconfigured underneath its processes.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub(crate) kind: MenuKind,
    pub(crate) lines: Vec<String>,
    pub(crate) active: Vec<usize>,
    pub(crate) urgent: Vec<usize>,
    pub(crate) separator: Option<String>,
    pub(crate) prompt: Option<String>,
    pub(crate) max_lines: Option<u32>,
    pub(crate) markup: bool,
    pub(crate) theme: Option<String>,
    pub(crate) insensitive: bool,
    pub(crate) icons: bool,
    pub(crate) row_height: Option<u32>,
}

impl MenuConfig {
    pub fn new(kind: MenuKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            active: Vec::new(),
            urgent: Vec::new(),
            separator: None,
            prompt: None,
            max_lines: None,
            markup: false,
            theme: None,
            insensitive: false,
            icons: false,
            row_height: None,
        }
    }

    /// Append a display line, optionally recording its index as active or
    /// urgent so the picker highlights it.
    pub fn add_line(mut self, line: impl Into<String>, status: Option<LineStatus>) -> Self {
        self.lines.push(line.into());

        let index = self.lines.len() - 1;
        match status {
            Some(LineStatus::Active) => self.active.push(index),
            Some(LineStatus::Urgent) => self.urgent.push(index),
            None => {}
        }

        self
    }

    pub fn with_prompt(mut self, text: impl Into<String>) -> Self {
        self.prompt = Some(text.into());
        self
    }

    pub fn with_max_lines(mut self, max: u32) -> Self {
        self.max_lines = Some(max);
        self
    }

    /// Interpret rows as markup.
    pub fn with_markup(mut self) -> Self {
        self.markup = true;
        self
    }

    /// Use a custom line separator instead of the default newline. The same
    /// character separates the lines written to the picker's stdin.
    pub fn with_separator(mut self, sep: impl Into<String>) -> Self {
        self.separator = Some(sep.into());
        self
    }

    /// Theme name, resolved against the configured theme directory.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Match search queries without caring about case.
    pub fn case_insensitive(mut self) -> Self {
        self.insensitive = true;
        self
    }

    /// Show the icons provided in the row data.
    pub fn with_icons(mut self) -> Self {
        self.icons = true;
        self
    }

    pub fn with_row_height(mut self, height: u32) -> Self {
        self.row_height = Some(height);
        self
    }

    pub(crate) fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or("\n")
    }

    /// The lines joined the way the picker will receive them.
    pub fn joined_lines(&self) -> String {
        self.lines.join(self.separator())
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self::new(MenuKind::Default)
    }
}

/// What happens when no selection arrives within the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Destroy both processes and terminate the whole calling process.
    ///
    /// Deliberately drastic: a wedged picker must never block an entire
    /// script indefinitely. This is a process-level escape hatch, not a
    /// recoverable error.
    ExitProcess,
    /// Destroy both processes and return
    /// [`MenuError::ResultTimeout`](crate::MenuError::ResultTimeout).
    Fail,
}

/// Orchestration knobs injected at construction time.
///
/// Replaces the environment lookups of earlier revisions; everything the
/// instance needs to locate and supervise the picker lives here.
#[derive(Debug, Clone)]
pub struct MenuSettings {
    /// Picker binary to launch.
    pub program: String,
    /// Directory theme names are resolved against.
    pub theme_dir: PathBuf,
    /// Every menu stays visible at least this long before the supervisor
    /// flow is torn down, so the picker is never killed mid-initialization.
    pub min_display: Duration,
    /// Bound on waiting for the handoff frame after a spawn.
    pub handoff_timeout: Duration,
    /// Bound on waiting for the user's selection.
    pub value_timeout: Duration,
    pub on_timeout: TimeoutPolicy,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            program: "rofi".to_string(),
            theme_dir: PathBuf::from("/usr/share/rofi/themes"),
            min_display: Duration::from_secs(1),
            handoff_timeout: Duration::from_secs(5),
            value_timeout: Duration::from_secs(120),
            on_timeout: TimeoutPolicy::ExitProcess,
        }
    }
}

impl MenuSettings {
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_theme_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.theme_dir = dir.into();
        self
    }

    pub fn with_min_display(mut self, floor: Duration) -> Self {
        self.min_display = floor;
        self
    }

    pub fn with_handoff_timeout(mut self, bound: Duration) -> Self {
        self.handoff_timeout = bound;
        self
    }

    pub fn with_value_timeout(mut self, bound: Duration) -> Self {
        self.value_timeout = bound;
        self
    }

    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.on_timeout = policy;
        self
    }
}
