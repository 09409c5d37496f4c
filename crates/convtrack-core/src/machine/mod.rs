//! Completion-detection state machine.
//!
//! The browser never says "the download finished". The page infers it from
//! three signals: the form submission, the pre-navigation event that follows
//! it, and the next page load that finds the persisted record armed. [`on`]
//! turns one of those events plus the current record into the next record,
//! a persistence decision and an ordered list of [`Effect`]s. It touches no
//! store, DOM or clock; [`crate::tracker::CompletionTracker`] does.

mod effect;
mod event;
mod phase;

pub use effect::{Effect, TimerAction};
pub use event::Event;
pub use phase::Phase;

use crate::config::TrackerConfig;
use crate::record::TrackingRecord;
use crate::ui::Severity;

/// What the runtime must do with the store after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persist {
    Unchanged,
    /// Write the whole new record.
    Save,
    /// Remove every key of the record.
    Clear,
}

/// A detected end of a processing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Whole seconds since submission, when the start time was known.
    pub elapsed_secs: Option<u64>,
}

/// Result of feeding one event to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub record: TrackingRecord,
    pub persist: Persist,
    pub effects: Vec<Effect>,
    /// Set when this event passed through `Complete`.
    pub completion: Option<Completion>,
}

impl Transition {
    /// Phases visited by this event, including the transient `Complete`.
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = vec![self.from];
        if self.completion.is_some() {
            phases.push(Phase::Complete);
        }
        if phases.last() != Some(&self.to) {
            phases.push(self.to);
        }
        phases
    }
}

/// Pure transition function.
pub fn on(event: &Event, record: &TrackingRecord, config: &TrackerConfig) -> Transition {
    let from = record.phase();
    let mut next = *record;
    let mut effects = Vec::new();
    let mut completion = None;

    match event {
        Event::Submit { now_ms } => {
            // Last submit wins; the one-shot flash marker belongs to the next load.
            next = TrackingRecord {
                suppress_flash_messages: record.suppress_flash_messages,
                ..TrackingRecord::submitted(*now_ms)
            };
        }
        Event::BeforeUnload => assume_download_started_on_unload(&mut next, config, &mut effects),
        Event::PageLoad {
            path,
            now_ms,
            has_flash,
        } => {
            completion = page_load(path, *now_ms, *has_flash, &mut next, config, &mut effects);
        }
    }

    let persist = if completion.is_some() && next.is_empty() {
        Persist::Clear
    } else if next != *record {
        Persist::Save
    } else {
        Persist::Unchanged
    };

    Transition {
        from,
        to: next.phase(),
        record: next,
        persist,
        effects,
        completion,
    }
}

/// Heuristic: treat a pre-navigation event during `Processing` as "the
/// browser has begun saving the file".
///
/// Browsers fire the same event for a real navigation and for a same-page
/// file-save response; the page cannot tell them apart. Whatever fires while
/// processing is in flight arms completion for the next page load. The
/// native confirmation prompt is never requested, since blocking here would
/// cancel downloads served as a same-page response.
pub fn assume_download_started_on_unload(
    record: &mut TrackingRecord,
    config: &TrackerConfig,
    effects: &mut Vec<Effect>,
) {
    if !record.pdf_processing || record.download_initiated {
        return;
    }
    record.download_initiated = true;
    effects.push(Effect::HideSpinner);
    effects.push(Effect::ShowSuccessIndicator);
    effects.push(Effect::SetProcessingText(config.messages.downloading.clone()));
    effects.push(Effect::SuppressUnloadPrompt);
}

fn page_load(
    path: &str,
    now_ms: i64,
    has_flash: bool,
    record: &mut TrackingRecord,
    config: &TrackerConfig,
    effects: &mut Vec<Effect>,
) -> Option<Completion> {
    // Returning from a download: the server's flash banner is stale. The
    // one-shot marker waits for a page that has a banner.
    if has_flash && (record.suppress_flash_messages || record.download_initiated) {
        effects.push(Effect::HideFlash);
        record.suppress_flash_messages = false;
    }

    let completion = if record.download_initiated {
        Some(show_download_complete(now_ms, record, config, effects))
    } else {
        None
    };

    if config.navigation.is_download_page(path) {
        record.download_initiated = true;
        effects.push(Effect::Schedule {
            delay: config.timing.redirect_delay(),
            action: TimerAction::Redirect(config.navigation.home_path.clone()),
        });
    }

    completion
}

fn show_download_complete(
    now_ms: i64,
    record: &mut TrackingRecord,
    config: &TrackerConfig,
    effects: &mut Vec<Effect>,
) -> Completion {
    effects.push(Effect::HideOverlay);
    effects.push(Effect::HideFlash);
    effects.push(Effect::ShowStatus {
        text: config.messages.complete.clone(),
        severity: Severity::Success,
    });

    let elapsed_secs = record
        .processing_start_time
        .map(|start| elapsed_whole_seconds(start, now_ms));
    if let Some(secs) = elapsed_secs {
        effects.push(Effect::AppendStatusLine(config.messages.elapsed_line(secs)));
        effects.push(Effect::AnimateStatus);
    }

    *record = TrackingRecord::default();
    Completion { elapsed_secs }
}

/// Floor of the elapsed time in seconds; a start time in the future counts as zero.
pub fn elapsed_whole_seconds(start_ms: i64, now_ms: i64) -> u64 {
    let elapsed_ms = now_ms.saturating_sub(start_ms).max(0);
    (elapsed_ms / 1000) as u64
}

#[cfg(test)]
mod tests;
