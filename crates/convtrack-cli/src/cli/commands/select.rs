//! `convtrack select <option>` – click a processing option.

use anyhow::{bail, Result};

use crate::cli::session::Browser;

pub fn run_select(browser: &Browser, path: &str, option: &str) -> Result<()> {
    if !browser.config().options.iter().any(|o| o == option) {
        bail!(
            "unknown option {option:?} (known: {})",
            browser.config().options.join(", ")
        );
    }
    let mut session = browser.open(path)?;
    session.option_clicked(option);
    println!("Active option: {}", session.page().active_options().join(", "));
    Ok(())
}
