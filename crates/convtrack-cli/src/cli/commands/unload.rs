//! `convtrack unload` – fire the pre-navigation event on a page.

use anyhow::Result;

use crate::cli::session::Browser;

pub fn run_unload(browser: &Browser, path: &str) -> Result<()> {
    let mut session = browser.open(path)?;
    let transition = session.before_unload();
    if transition.effects.is_empty() {
        println!("Nothing in flight ({})", transition.to);
    } else {
        println!("Download assumed started ({} -> {})", transition.from, transition.to);
        print!("{}", session.page());
    }
    Ok(())
}
