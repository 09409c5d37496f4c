//! Page-facing UI contracts shared by every [`crate::page::Page`] implementation.

mod options;
mod status;

pub use options::{OptionGroup, OptionMark};
pub use status::{
    Severity, StatusBoard, StatusMessage, ANIMATION_CLASSES, DETAIL_LINE_CLASS,
};
