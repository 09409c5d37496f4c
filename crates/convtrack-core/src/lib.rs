pub mod config;
pub mod logging;

pub mod machine;
pub mod page;
pub mod record;
pub mod store;
pub mod tracker;
pub mod ui;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use tracker::CompletionTracker;
