//! Completion tracker runtime.
//!
//! Owns the store, the page and the in-memory copy of the record for one
//! page session. Each browser event goes through [`machine::on`]; the
//! result is persisted first, then its effects are applied to the page.
//! Timers and option clicks are handled here directly since they carry no
//! persisted state.

use crate::config::TrackerConfig;
use crate::machine::{self, Effect, Event, Persist, TimerAction, Transition};
use crate::page::{Element, Page};
use crate::record::TrackingRecord;
use crate::store::KeyValueStore;
use crate::ui::{OptionGroup, Severity, StatusBoard};

pub struct CompletionTracker<S, P> {
    config: TrackerConfig,
    store: S,
    page: P,
    record: TrackingRecord,
    options: OptionGroup,
    status: StatusBoard,
}

impl<S: KeyValueStore, P: Page> CompletionTracker<S, P> {
    pub fn new(config: TrackerConfig, store: S, page: P) -> Self {
        let record = load_record(&store);
        let options = OptionGroup::new(page.option_ids());
        Self {
            config,
            store,
            page,
            record,
            options,
            status: StatusBoard::new(),
        }
    }

    /// The document finished loading. Re-reads the record, since another
    /// page may have written it since this tracker was built.
    pub fn page_loaded(&mut self, now_ms: i64) -> Transition {
        self.record = load_record(&self.store);
        let path = self.page.path();
        let has_flash = self.page.has(Element::Flash);
        self.dispatch(Event::PageLoad {
            path,
            now_ms,
            has_flash,
        })
    }

    pub fn form_submitted(&mut self, now_ms: i64) -> Transition {
        self.dispatch(Event::Submit { now_ms })
    }

    /// Pre-navigation event. Never asks the browser to block navigation.
    pub fn before_unload(&mut self) -> Transition {
        self.dispatch(Event::BeforeUnload)
    }

    pub fn dispatch(&mut self, event: Event) -> Transition {
        let transition = machine::on(&event, &self.record, &self.config);
        tracing::debug!(
            event = event.name(),
            from = %transition.from,
            to = %transition.to,
            effects = transition.effects.len(),
            "tracker transition"
        );
        if let Some(completion) = transition.completion {
            tracing::info!(elapsed_secs = ?completion.elapsed_secs, "conversion cycle complete");
        }

        self.persist(&transition);
        self.record = transition.record;
        for effect in &transition.effects {
            self.apply(effect);
        }
        transition
    }

    /// A timer previously handed to [`Page::schedule`] has elapsed.
    pub fn timer_fired(&mut self, action: TimerAction) {
        match action {
            TimerAction::Redirect(path) => {
                tracing::info!("redirecting to {}", path);
                self.page.navigate(&path);
            }
            TimerAction::HideStatus { serial } => {
                if self.status.expire(serial) {
                    self.page.hide_status();
                }
            }
        }
    }

    pub fn option_clicked(&mut self, id: &str) {
        let marks = self.options.select(id);
        if marks.is_empty() {
            tracing::debug!(option = id, "click on unknown option ignored");
        } else {
            tracing::debug!(active = ?self.options.active(), "option selected");
        }
        for mark in marks {
            self.page.set_option_active(&mark.id, mark.active);
        }
    }

    /// Replace the status message. Success messages schedule their own hide.
    pub fn show_status(&mut self, text: &str, severity: Severity) {
        if !self.page.has(Element::StatusMessage) {
            return;
        }
        let message = self.status.show(text, severity);
        self.page.show_status(&message);
        if let Some(delay) = message.auto_hide_after(&self.config.timing) {
            self.page.schedule(
                delay,
                TimerAction::HideStatus {
                    serial: message.serial,
                },
            );
        }
    }

    pub fn record(&self) -> &TrackingRecord {
        &self.record
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    fn persist(&mut self, transition: &Transition) {
        let result = match transition.persist {
            Persist::Unchanged => return,
            Persist::Save => transition.record.save(&mut self.store),
            Persist::Clear => TrackingRecord::clear(&mut self.store),
        };
        // The in-memory record stays authoritative for this page session.
        if let Err(e) = result {
            tracing::warn!("persisting tracking record failed: {}", e);
        }
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::HideFlash => self.page.set_visible(Element::Flash, false),
            Effect::HideOverlay => self.page.set_visible(Element::Overlay, false),
            Effect::HideSpinner => self.page.set_visible(Element::Spinner, false),
            Effect::ShowSuccessIndicator => {
                self.page.set_visible(Element::SuccessIndicator, true)
            }
            Effect::SetProcessingText(text) => self.page.set_processing_text(text),
            Effect::ShowStatus { text, severity } => self.show_status(text, *severity),
            Effect::AppendStatusLine(text) => self.page.append_status_line(text),
            Effect::AnimateStatus => self.page.animate_status(),
            Effect::SuppressUnloadPrompt => {}
            Effect::Schedule { delay, action } => self.page.schedule(*delay, action.clone()),
        }
    }
}

fn load_record<S: KeyValueStore>(store: &S) -> TrackingRecord {
    TrackingRecord::load(store).unwrap_or_else(|e| {
        tracing::warn!("reading tracking record failed, treating as idle: {}", e);
        TrackingRecord::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SimulatedPage;
    use crate::store::{MemoryStore, StoreError};

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Browser("storage disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Browser("storage disabled".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Browser("storage disabled".into()))
        }
    }

    #[test]
    fn broken_store_degrades_to_in_memory_session() {
        let config = TrackerConfig::default();
        let page = SimulatedPage::from_config("/", &config);
        let mut tracker = CompletionTracker::new(config, BrokenStore, page);

        tracker.page_loaded(0);
        tracker.form_submitted(1_000);
        let t = tracker.before_unload();
        assert!(t.record.download_initiated);
        assert!(tracker.record().download_initiated);
        assert!(tracker.page().is_visible(Element::SuccessIndicator));
    }

    #[test]
    fn success_status_auto_hide_only_hides_its_own_message() {
        let config = TrackerConfig::default();
        let page = SimulatedPage::from_config("/", &config);
        let mut tracker = CompletionTracker::new(config, MemoryStore::new(), page);

        tracker.show_status("converted", Severity::Success);
        let timers = tracker.page_mut().take_timers();
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].delay.as_millis(), 5000);

        tracker.show_status("upload failed", Severity::Danger);
        assert!(tracker.page_mut().take_timers().is_empty());

        tracker.timer_fired(timers[0].action.clone());
        let status = tracker.page().status().expect("danger message persists");
        assert_eq!(status.text, "upload failed");
    }

    #[test]
    fn success_status_hides_after_its_timer() {
        let config = TrackerConfig::default();
        let page = SimulatedPage::from_config("/", &config);
        let mut tracker = CompletionTracker::new(config, MemoryStore::new(), page);

        tracker.show_status("converted", Severity::Success);
        let timers = tracker.page_mut().take_timers();
        tracker.timer_fired(timers[0].action.clone());
        assert!(tracker.page().status().is_none());
    }

    #[test]
    fn missing_status_container_schedules_nothing() {
        let config = TrackerConfig::default();
        let page = SimulatedPage::from_config("/", &config).without(Element::StatusMessage);
        let mut tracker = CompletionTracker::new(config, MemoryStore::new(), page);

        tracker.show_status("converted", Severity::Success);
        assert!(tracker.page().timers().is_empty());
    }
}
