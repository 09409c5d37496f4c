use std::time::Duration;

use crate::ui::Severity;

/// Work the runtime performs after a transition, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hide the server-rendered flash banner.
    HideFlash,
    /// Hide the processing overlay.
    HideOverlay,
    /// Hide the spinner inside the overlay.
    HideSpinner,
    /// Show the success glyph.
    ShowSuccessIndicator,
    /// Replace the overlay's status text.
    SetProcessingText(String),
    /// Replace the status message.
    ShowStatus { text: String, severity: Severity },
    /// Append a secondary line under the current status message.
    AppendStatusLine(String),
    /// Play the entrance animation on the status message.
    AnimateStatus,
    /// Let the pending navigation proceed without a confirmation prompt.
    SuppressUnloadPrompt,
    /// Run `action` once after `delay`. Not cancellable.
    Schedule { delay: Duration, action: TimerAction },
}

/// Deferred work carried by a one-shot page timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    /// Navigate the page to `path`.
    Redirect(String),
    /// Hide the status message numbered `serial`, if it is still the one shown.
    HideStatus { serial: u64 },
}
