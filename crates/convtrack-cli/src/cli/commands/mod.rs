//! CLI command handlers. Each command is in its own file.

mod clear;
mod load;
mod select;
mod status;
mod submit;
mod unload;

pub use clear::run_clear;
pub use load::run_load;
pub use select::run_select;
pub use status::run_status;
pub use submit::run_submit;
pub use unload::run_unload;
