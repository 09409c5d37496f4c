//! Host page abstraction.
//!
//! A [`Page`] is everything the tracker needs from the document it runs in:
//! a handful of elements found by id, the current path, one-shot timers and
//! navigation. Absent elements are normal; implementations skip any
//! operation on an element they do not have.

mod simulated;

pub use simulated::{RenderedStatus, ScheduledTimer, SimulatedPage};

use std::time::Duration;

use crate::machine::TimerAction;
use crate::ui::StatusMessage;

/// Elements the tracker shows or hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Overlay,
    Spinner,
    SuccessIndicator,
    ProcessingStatus,
    StatusMessage,
    Flash,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::Overlay,
        Element::Spinner,
        Element::SuccessIndicator,
        Element::ProcessingStatus,
        Element::StatusMessage,
        Element::Flash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Element::Overlay => "overlay",
            Element::Spinner => "spinner",
            Element::SuccessIndicator => "success-indicator",
            Element::ProcessingStatus => "processing-status",
            Element::StatusMessage => "status-message",
            Element::Flash => "flash",
        }
    }
}

/// URL path of `location`, which may be an absolute URL or a site-relative
/// path. Query and fragment are dropped.
pub fn path_of(location: &str) -> Option<String> {
    let base = url::Url::parse("http://localhost/").ok()?;
    let parsed = base.join(location.trim()).ok()?;
    Some(parsed.path().to_string())
}

/// Identifier of the `index`-th option element: its DOM id, or a positional
/// fallback when the element has none.
pub fn option_key(index: usize, dom_id: &str) -> String {
    if dom_id.is_empty() {
        format!("option-{index}")
    } else {
        dom_id.to_string()
    }
}

/// Timer delay in whole milliseconds, saturated to what `setTimeout` accepts.
pub fn timeout_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

pub trait Page {
    /// URL path of the current document.
    fn path(&self) -> String;

    fn has(&self, element: Element) -> bool;

    fn set_visible(&mut self, element: Element, visible: bool);

    fn set_processing_text(&mut self, text: &str);

    /// Replace the status container's content with `message` and show it.
    fn show_status(&mut self, message: &StatusMessage);

    fn hide_status(&mut self);

    /// Append a secondary line to the status container.
    fn append_status_line(&mut self, text: &str);

    fn animate_status(&mut self);

    /// Identifiers of the mutually exclusive option elements, in document order.
    fn option_ids(&self) -> Vec<String>;

    fn set_option_active(&mut self, id: &str, active: bool);

    /// Arrange for `action` to be handed back to the tracker after `delay`.
    fn schedule(&mut self, delay: Duration, action: TimerAction);

    fn navigate(&mut self, path: &str);
}
