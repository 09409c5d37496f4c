//! Browser binding: `localStorage`, DOM lookups by id, `setTimeout` timers.
//!
//! Call [`install`] from the page once the document has loaded. It builds a
//! tracker over the real document, runs the page-load transition and wires
//! the `submit`, `beforeunload` and option `click` listeners. Listeners share
//! the tracker through `Rc<RefCell<_>>`; an event that arrives while another
//! handler holds the tracker is dropped.
//!
//! Log output goes to the browser console (see
//! [`crate::logging::init_console_logging`]). Nothing here runs under native
//! `cargo test`; the [`Page`] contract is exercised through
//! [`crate::page::SimulatedPage`], and the pure helpers this binding uses
//! (`option_key`, `timeout_ms`) are tested in [`crate::page`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element as DomElement, EventTarget, HtmlElement, Storage, Window};

use crate::config::{DomConfig, TrackerConfig};
use crate::machine::TimerAction;
use crate::page::{option_key, timeout_ms, Element, Page, ScheduledTimer};
use crate::store::{KeyValueStore, StoreError};
use crate::tracker::CompletionTracker;
use crate::ui::{StatusMessage, ANIMATION_CLASSES, DETAIL_LINE_CLASS};

type WebTracker = CompletionTracker<LocalStorageStore, DomPage>;

fn js_err(e: JsValue) -> StoreError {
    StoreError::Browser(format!("{e:?}"))
}

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// `window.localStorage`. Absent when storage is disabled; every access then fails.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Browser("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?.remove_item(key).map_err(js_err)
    }
}

/// The live document.
pub struct DomPage {
    window: Window,
    document: Document,
    dom: DomConfig,
    options: Vec<(String, DomElement)>,
    timers: Vec<ScheduledTimer>,
}

impl DomPage {
    pub fn new(window: Window, document: Document, config: &TrackerConfig) -> Self {
        let collection = document.get_elements_by_class_name(&config.dom.option_class);
        let options = (0..collection.length())
            .filter_map(|i| collection.item(i))
            .enumerate()
            .map(|(i, el)| (option_key(i, &el.id()), el))
            .collect();
        Self {
            window,
            document,
            dom: config.dom.clone(),
            options,
            timers: Vec::new(),
        }
    }

    fn by_id(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id)
    }

    fn element(&self, element: Element) -> Option<DomElement> {
        match element {
            Element::Overlay => self.by_id(&self.dom.overlay_id),
            Element::Spinner => self
                .by_id(&self.dom.overlay_id)?
                .query_selector(&self.dom.spinner_selector)
                .ok()
                .flatten(),
            Element::SuccessIndicator => self.by_id(&self.dom.success_indicator_id),
            Element::ProcessingStatus => self.by_id(&self.dom.processing_status_id),
            Element::StatusMessage => self.by_id(&self.dom.status_message_id),
            Element::Flash => self.by_id(&self.dom.flash_messages_id),
        }
    }

    fn option_elements(&self) -> Vec<(String, DomElement)> {
        self.options.clone()
    }

    fn take_timers(&mut self) -> Vec<ScheduledTimer> {
        std::mem::take(&mut self.timers)
    }
}

fn set_display(el: &DomElement, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("display", value);
    }
}

impl Page for DomPage {
    fn path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }

    fn has(&self, element: Element) -> bool {
        self.element(element).is_some()
    }

    fn set_visible(&mut self, element: Element, visible: bool) {
        if let Some(el) = self.element(element) {
            set_display(&el, if visible { "block" } else { "none" });
        }
    }

    fn set_processing_text(&mut self, text: &str) {
        if let Some(el) = self.element(Element::ProcessingStatus) {
            el.set_text_content(Some(text));
        }
    }

    fn show_status(&mut self, message: &StatusMessage) {
        if let Some(el) = self.element(Element::StatusMessage) {
            el.set_text_content(Some(&message.text));
            el.set_class_name(&message.class_name());
            set_display(&el, "block");
        }
    }

    fn hide_status(&mut self) {
        self.set_visible(Element::StatusMessage, false);
    }

    fn append_status_line(&mut self, text: &str) {
        let Some(el) = self.element(Element::StatusMessage) else {
            return;
        };
        let Ok(line) = self.document.create_element("div") else {
            return;
        };
        line.set_class_name(DETAIL_LINE_CLASS);
        line.set_text_content(Some(text));
        let _ = el.append_child(&line);
    }

    fn animate_status(&mut self) {
        if let Some(el) = self.element(Element::StatusMessage) {
            let classes = el.class_list();
            for class in ANIMATION_CLASSES {
                let _ = classes.add_1(class);
            }
        }
    }

    fn option_ids(&self) -> Vec<String> {
        self.options.iter().map(|(id, _)| id.clone()).collect()
    }

    fn set_option_active(&mut self, id: &str, active: bool) {
        if let Some((_, el)) = self.options.iter().find(|(o, _)| o == id) {
            let classes = el.class_list();
            let _ = if active {
                classes.add_1(&self.dom.active_class)
            } else {
                classes.remove_1(&self.dom.active_class)
            };
        }
    }

    fn schedule(&mut self, delay: Duration, action: TimerAction) {
        self.timers.push(ScheduledTimer { delay, action });
    }

    fn navigate(&mut self, path: &str) {
        if let Err(e) = self.window.location().set_href(path) {
            tracing::warn!("navigation to {} failed: {:?}", path, e);
        }
    }
}

/// Hand every timer the page collected to `setTimeout`.
fn flush_timers(tracker: &Rc<RefCell<WebTracker>>, window: &Window) {
    let timers = match tracker.try_borrow_mut() {
        Ok(mut t) => t.page_mut().take_timers(),
        Err(_) => return,
    };
    for timer in timers {
        let handle = Rc::clone(tracker);
        let timer_window = window.clone();
        let callback = Closure::once_into_js(move || {
            if let Ok(mut t) = handle.try_borrow_mut() {
                t.timer_fired(timer.action);
            }
            flush_timers(&handle, &timer_window);
        });
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            timeout_ms(timer.delay),
        )
        {
            tracing::warn!("setTimeout failed: {:?}", e);
        }
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Attach the tracker to the current document with the default configuration.
#[wasm_bindgen]
pub fn install() -> Result<(), JsValue> {
    install_with(TrackerConfig::default())
}

pub fn install_with(config: TrackerConfig) -> Result<(), JsValue> {
    crate::logging::init_console_logging();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let form = document.get_element_by_id(&config.dom.form_id);
    let store = LocalStorageStore::new(&window);
    let page = DomPage::new(window.clone(), document, &config);
    let option_elements = page.option_elements();

    let tracker = Rc::new(RefCell::new(CompletionTracker::new(config, store, page)));
    tracker.borrow_mut().page_loaded(now_ms());
    flush_timers(&tracker, &window);

    if let Some(form) = form {
        let handle = Rc::clone(&tracker);
        listen(&form, "submit", move |_| {
            if let Ok(mut t) = handle.try_borrow_mut() {
                t.form_submitted(now_ms());
            }
        })?;
    }

    // No preventDefault and no returnValue: the browser must not prompt here.
    let handle = Rc::clone(&tracker);
    listen(&window, "beforeunload", move |_| {
        if let Ok(mut t) = handle.try_borrow_mut() {
            t.before_unload();
        }
    })?;

    for (id, el) in option_elements {
        let handle = Rc::clone(&tracker);
        listen(&el, "click", move |_| {
            if let Ok(mut t) = handle.try_borrow_mut() {
                t.option_clicked(&id);
            }
        })?;
    }

    Ok(())
}
