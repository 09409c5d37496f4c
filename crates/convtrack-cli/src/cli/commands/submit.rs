//! `convtrack submit` – submit the conversion form.

use anyhow::Result;

use crate::cli::session::{now_ms, Browser};

pub fn run_submit(browser: &Browser, path: &str) -> Result<()> {
    let mut session = browser.open(path)?;
    let now = now_ms();
    let transition = session.form_submitted(now);
    println!("Submitted at {now} ms ({} -> {})", transition.from, transition.to);
    Ok(())
}
