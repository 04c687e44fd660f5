//! Notification sending through `dunstify`.

use crate::exec::run_checked;
use crate::OsResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Normal,
    Critical,
}

impl Urgency {
    fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::Critical => "critical",
        }
    }
}

/// One notification, built up through consuming calls and fired with
/// [`Notification::send`].
///
/// The id only matters when [`Notification::replace`] is set: it lets a
/// later notification take the place of an earlier one, which is how
/// progress-style notifications stay a single popup.
#[derive(Debug, Clone)]
pub struct Notification {
    id: u32,
    appname: Option<String>,
    summary: Option<String>,
    icon: Option<String>,
    urgency: Option<Urgency>,
    hint: Option<String>,
    replace: bool,
}

impl Notification {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            appname: None,
            summary: None,
            icon: None,
            urgency: None,
            hint: None,
            replace: false,
        }
    }

    /// Application name shown in the notification.
    pub fn appname(mut self, name: impl Into<String>) -> Self {
        self.appname = Some(name.into());
        self
    }

    /// Notification contents.
    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.summary = Some(text.into());
        self
    }

    /// Icon name or full path; the daemon resolves names on its own.
    pub fn icon(mut self, name: impl Into<String>) -> Self {
        self.icon = Some(name.into());
        self
    }

    pub fn urgency(mut self, level: Urgency) -> Self {
        self.urgency = Some(level);
        self
    }

    /// Daemon hint, e.g. a progress percentage for the built-in bar.
    pub fn hint(mut self, value: impl Into<String>) -> Self {
        self.hint = Some(value.into());
        self
    }

    /// Replace a previous notification carrying the same id.
    pub fn replace(mut self) -> Self {
        self.replace = true;
        self
    }

    /// The dunstify argument list this notification renders to.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(appname) = &self.appname {
            args.push("-a".to_string());
            args.push(appname.clone());
        }
        if let Some(urgency) = self.urgency {
            args.push("-u".to_string());
            args.push(urgency.as_str().to_string());
        }
        if let Some(icon) = &self.icon {
            args.push("-i".to_string());
            args.push(icon.clone());
        }
        if self.replace {
            args.push("-r".to_string());
            args.push(self.id.to_string());
        }
        if let Some(hint) = &self.hint {
            args.push("-h".to_string());
            args.push(hint.clone());
        }

        args.push(self.summary.clone().unwrap_or_default());
        args
    }

    /// Hand the notification to the daemon.
    pub async fn send(&self) -> OsResult<()> {
        let args = self.to_args();
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        run_checked("dunstify", &refs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_only_what_was_set() {
        let args = Notification::new(1).summary("hello").to_args();
        assert_eq!(args, vec!["hello"]);

        let args = Notification::new(42)
            .appname("Screenshot")
            .urgency(Urgency::Low)
            .icon("/tmp/shot.png")
            .summary("saved")
            .to_args();
        assert_eq!(
            args,
            vec!["-a", "Screenshot", "-u", "low", "-i", "/tmp/shot.png", "saved"]
        );
    }

    #[test]
    fn replace_injects_the_id() {
        let args = Notification::new(5123).replace().summary("again").to_args();
        assert_eq!(args, vec!["-r", "5123", "again"]);
    }

    #[test]
    fn hint_is_passed_through() {
        let args = Notification::new(1)
            .hint("int:value:40")
            .summary("volume")
            .to_args();
        assert_eq!(args, vec!["-h", "int:value:40", "volume"]);
    }
}
