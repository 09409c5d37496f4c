//! `convtrack load <path> [--follow]` – load a page, optionally living through its timers.

use anyhow::{bail, Result};
use std::time::Duration;

use crate::cli::session::{Browser, PageSession};

/// Redirect chains longer than this are treated as a loop.
const MAX_REDIRECTS: usize = 8;

pub async fn run_load(browser: &Browser, target: &str, follow: bool) -> Result<()> {
    let mut session = browser.open(target)?;
    print!("{}", session.page());

    if !follow {
        return Ok(());
    }

    let mut hops = 0;
    while let Some(next) = run_timers(&mut session).await {
        hops += 1;
        if hops > MAX_REDIRECTS {
            bail!("more than {MAX_REDIRECTS} redirects, last target {next}");
        }
        // Leaving the page fires its pre-navigation event.
        session.before_unload();
        session = browser.open(&next)?;
        print!("{}", session.page());
    }
    Ok(())
}

/// Fire the page's timers in delay order. Returns the navigation target if
/// one of them left the page; timers still pending then die with it.
async fn run_timers(session: &mut PageSession) -> Option<String> {
    let mut timers = session.page_mut().take_timers();
    timers.sort_by_key(|t| t.delay);

    let mut waited = Duration::ZERO;
    for timer in timers {
        tokio::time::sleep(timer.delay.saturating_sub(waited)).await;
        waited = timer.delay;
        tracing::debug!(action = ?timer.action, "timer fired");
        session.timer_fired(timer.action);
        if let Some(target) = session.page().navigations().last() {
            println!("-> {target}");
            return Some(target.clone());
        }
    }
    if waited > Duration::ZERO {
        print!("{}", session.page());
    }
    None
}
