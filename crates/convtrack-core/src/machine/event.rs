/// Browser-level events the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The page finished loading at `path` (the URL path, no query).
    /// `has_flash` tells whether the document carries a flash banner.
    PageLoad {
        path: String,
        now_ms: i64,
        has_flash: bool,
    },
    /// The tracked form was submitted.
    Submit { now_ms: i64 },
    /// The browser is about to navigate away or start a same-page file save.
    BeforeUnload,
}

impl Event {
    /// Load of a page that has a flash banner.
    pub fn page_load(path: impl Into<String>, now_ms: i64) -> Self {
        Event::PageLoad {
            path: path.into(),
            now_ms,
            has_flash: true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::PageLoad { .. } => "page_load",
            Event::Submit { .. } => "submit",
            Event::BeforeUnload => "before_unload",
        }
    }
}
