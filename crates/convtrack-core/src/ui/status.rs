//! Status message rendering contract.

use std::fmt;
use std::time::Duration;

use crate::config::TimingConfig;

/// Visual severity of a status message (maps onto the page's alert classes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classes applied to the container of the secondary elapsed-time line.
pub const DETAIL_LINE_CLASS: &str = "mt-2 small text-muted";

/// Entrance animation classes added once completion is shown.
pub const ANIMATION_CLASSES: [&str; 2] = ["animate__animated", "animate__bounceIn"];

/// A shown status message. `serial` increases with every message so an
/// auto-hide timer can tell whether its message was replaced meanwhile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub serial: u64,
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    /// Full class attribute of the status container.
    pub fn class_name(&self) -> String {
        format!("status-message mb-4 alert alert-{}", self.severity)
    }

    /// Success messages hide themselves; everything else stays until replaced.
    pub fn auto_hide_after(&self, timing: &TimingConfig) -> Option<Duration> {
        match self.severity {
            Severity::Success => Some(timing.success_hide()),
            Severity::Info | Severity::Warning | Severity::Danger => None,
        }
    }
}

/// Hands out message serials and remembers which message is on screen.
#[derive(Debug, Default)]
pub struct StatusBoard {
    next_serial: u64,
    shown: Option<u64>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new message as the one on screen.
    pub fn show(&mut self, text: impl Into<String>, severity: Severity) -> StatusMessage {
        self.next_serial += 1;
        self.shown = Some(self.next_serial);
        StatusMessage {
            serial: self.next_serial,
            text: text.into(),
            severity,
        }
    }

    /// Whether an auto-hide for `serial` should act. Consumes the message if so.
    pub fn expire(&mut self, serial: u64) -> bool {
        if self.shown == Some(serial) {
            self.shown = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_follows_severity() {
        let mut board = StatusBoard::new();
        let msg = board.show("done", Severity::Success);
        assert_eq!(msg.class_name(), "status-message mb-4 alert alert-success");
        let msg = board.show("careful", Severity::Warning);
        assert_eq!(msg.class_name(), "status-message mb-4 alert alert-warning");
    }

    #[test]
    fn only_success_auto_hides() {
        let timing = TimingConfig::default();
        let mut board = StatusBoard::new();
        assert_eq!(
            board.show("ok", Severity::Success).auto_hide_after(&timing),
            Some(Duration::from_millis(5000))
        );
        for severity in [Severity::Info, Severity::Warning, Severity::Danger] {
            assert_eq!(board.show("x", severity).auto_hide_after(&timing), None);
        }
    }

    #[test]
    fn stale_expiry_does_not_hide_replacement() {
        let mut board = StatusBoard::new();
        let first = board.show("first", Severity::Success);
        let second = board.show("second", Severity::Danger);
        assert!(!board.expire(first.serial));
        assert!(board.expire(second.serial));
        assert!(!board.expire(second.serial));
    }
}
