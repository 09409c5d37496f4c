//! In-memory page: a minimal document model that records what the tracker did.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use super::{Element, Page};
use crate::config::TrackerConfig;
use crate::machine::TimerAction;
use crate::ui::{Severity, StatusMessage};

/// Status container content as last rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStatus {
    pub serial: u64,
    pub text: String,
    pub severity: Severity,
    pub class_name: String,
    pub lines: Vec<String>,
    pub animated: bool,
}

/// A timer the page was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub delay: Duration,
    pub action: TimerAction,
}

#[derive(Debug, Clone)]
pub struct SimulatedPage {
    path: String,
    present: BTreeSet<Element>,
    visible: BTreeSet<Element>,
    processing_text: Option<String>,
    status: Option<RenderedStatus>,
    options: Vec<(String, bool)>,
    timers: Vec<ScheduledTimer>,
    navigations: Vec<String>,
}

impl SimulatedPage {
    /// A page at `path` with every element present. The overlay, spinner
    /// and flash banner start visible; the success glyph and status
    /// container start hidden.
    pub fn new(path: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            path: path.into(),
            present: Element::ALL.into_iter().collect(),
            visible: [Element::Overlay, Element::Spinner, Element::Flash]
                .into_iter()
                .collect(),
            processing_text: None,
            status: None,
            options: options.into_iter().map(|id| (id, false)).collect(),
            timers: Vec::new(),
            navigations: Vec::new(),
        }
    }

    pub fn from_config(path: impl Into<String>, config: &TrackerConfig) -> Self {
        Self::new(path, config.options.clone())
    }

    /// Remove `element` from the document.
    pub fn without(mut self, element: Element) -> Self {
        self.present.remove(&element);
        self.visible.remove(&element);
        self
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.visible.contains(&element)
    }

    pub fn processing_text(&self) -> Option<&str> {
        self.processing_text.as_deref()
    }

    /// Rendered status, if the container currently shows one.
    pub fn status(&self) -> Option<&RenderedStatus> {
        if self.is_visible(Element::StatusMessage) {
            self.status.as_ref()
        } else {
            None
        }
    }

    pub fn active_options(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|(_, active)| *active)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn timers(&self) -> &[ScheduledTimer] {
        &self.timers
    }

    /// Hand the pending timers to the caller, which is responsible for firing them.
    pub fn take_timers(&mut self) -> Vec<ScheduledTimer> {
        std::mem::take(&mut self.timers)
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

impl Page for SimulatedPage {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn has(&self, element: Element) -> bool {
        self.present.contains(&element)
    }

    fn set_visible(&mut self, element: Element, visible: bool) {
        if !self.has(element) {
            return;
        }
        if visible {
            self.visible.insert(element);
        } else {
            self.visible.remove(&element);
        }
    }

    fn set_processing_text(&mut self, text: &str) {
        if self.has(Element::ProcessingStatus) {
            self.processing_text = Some(text.to_string());
        }
    }

    fn show_status(&mut self, message: &StatusMessage) {
        if !self.has(Element::StatusMessage) {
            return;
        }
        self.status = Some(RenderedStatus {
            serial: message.serial,
            text: message.text.clone(),
            severity: message.severity,
            class_name: message.class_name(),
            lines: Vec::new(),
            animated: false,
        });
        self.visible.insert(Element::StatusMessage);
    }

    fn hide_status(&mut self) {
        self.set_visible(Element::StatusMessage, false);
    }

    fn append_status_line(&mut self, text: &str) {
        if let Some(status) = self.status.as_mut() {
            status.lines.push(text.to_string());
        }
    }

    fn animate_status(&mut self) {
        if let Some(status) = self.status.as_mut() {
            status.animated = true;
        }
    }

    fn option_ids(&self) -> Vec<String> {
        self.options.iter().map(|(id, _)| id.clone()).collect()
    }

    fn set_option_active(&mut self, id: &str, active: bool) {
        if let Some((_, flag)) = self.options.iter_mut().find(|(o, _)| o == id) {
            *flag = active;
        }
    }

    fn schedule(&mut self, delay: Duration, action: TimerAction) {
        self.timers.push(ScheduledTimer { delay, action });
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
    }
}

impl fmt::Display for SimulatedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "page {}", self.path)?;
        for element in Element::ALL {
            let state = if !self.has(element) {
                "absent"
            } else if self.is_visible(element) {
                "shown"
            } else {
                "hidden"
            };
            writeln!(f, "  {:<18} {}", element.as_str(), state)?;
        }
        if let Some(text) = &self.processing_text {
            writeln!(f, "  overlay text: {text}")?;
        }
        if let Some(status) = self.status() {
            writeln!(f, "  status [{}]: {}", status.severity, status.text)?;
            for line in &status.lines {
                writeln!(f, "    {line}")?;
            }
        }
        let active = self.active_options();
        if !active.is_empty() {
            writeln!(f, "  active option: {}", active.join(", "))?;
        }
        for timer in &self.timers {
            writeln!(f, "  timer +{}ms: {:?}", timer.delay.as_millis(), timer.action)?;
        }
        for path in &self.navigations {
            writeln!(f, "  navigated to {path}")?;
        }
        Ok(())
    }
}
