//! `convtrack clear` – drop the tracking record.

use anyhow::Result;
use convtrack_core::record::TrackingRecord;

use crate::cli::session::Browser;

pub fn run_clear(browser: &Browser) -> Result<()> {
    let mut store = browser.open_store()?;
    TrackingRecord::clear(&mut store)?;
    println!("Cleared tracking record");
    Ok(())
}
