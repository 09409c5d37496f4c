//! `convtrack status` – show the persisted tracking record.

use anyhow::Result;
use convtrack_core::record::{keys, TrackingRecord};
use convtrack_core::store::KeyValueStore;

use crate::cli::session::Browser;

pub fn run_status(browser: &Browser) -> Result<()> {
    let store = browser.open_store()?;
    let record = TrackingRecord::load(&store)?;
    println!("store: {}", browser.store_path().display());
    println!("phase: {}", record.phase());
    for key in keys::ALL {
        let value = store.get(key)?.unwrap_or_else(|| "-".to_string());
        println!("{:<22} {}", key, value);
    }
    Ok(())
}
