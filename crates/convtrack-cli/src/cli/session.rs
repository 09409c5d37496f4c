//! One simulated browser tab: a config plus the store file every page shares.

use anyhow::{Context, Result};
use convtrack_core::config::TrackerConfig;
use convtrack_core::page::{self, SimulatedPage};
use convtrack_core::store::FileStore;
use convtrack_core::CompletionTracker;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub type PageSession = CompletionTracker<FileStore, SimulatedPage>;

#[derive(Debug, Clone)]
pub struct Browser {
    config: TrackerConfig,
    store_path: PathBuf,
}

impl Browser {
    pub fn new(config: TrackerConfig, store_path: PathBuf) -> Self {
        Self { config, store_path }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn open_store(&self) -> Result<FileStore> {
        FileStore::open_at(&self.store_path)
    }

    /// Load the page at `location` (path or URL) and run its load handler.
    pub fn open(&self, location: &str) -> Result<PageSession> {
        let path = page::path_of(location)
            .with_context(|| format!("not a page path or URL: {location}"))?;
        let store = self.open_store()?;
        let page = SimulatedPage::from_config(path.as_str(), &self.config);
        let mut session = CompletionTracker::new(self.config.clone(), store, page);
        let transition = session.page_loaded(now_ms());
        let phases: Vec<&str> = transition.phases().into_iter().map(|p| p.as_str()).collect();
        tracing::info!(path = %path, phases = %phases.join(" -> "), "page loaded");
        Ok(session)
    }
}

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
