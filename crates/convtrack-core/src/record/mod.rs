//! The persisted tracking record.
//!
//! One record describes at most one conversion cycle. It is loaded at every
//! page load, rewritten as a whole on every change, and removed as a whole
//! once completion has been shown.

pub mod keys;

use crate::machine::Phase;
use crate::store::{KeyValueStore, StoreError};

/// Snapshot of the five persisted fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackingRecord {
    pub pdf_processing: bool,
    pub download_initiated: bool,
    /// Submission wall-clock time in milliseconds since the Unix epoch.
    pub processing_start_time: Option<i64>,
    pub show_success_animation: bool,
    pub suppress_flash_messages: bool,
}

impl TrackingRecord {
    /// Record written by a form submission at `now_ms`.
    pub fn submitted(now_ms: i64) -> Self {
        Self {
            pdf_processing: true,
            download_initiated: false,
            processing_start_time: Some(now_ms),
            show_success_animation: true,
            suppress_flash_messages: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.download_initiated {
            Phase::Downloading
        } else if self.pdf_processing {
            Phase::Processing
        } else {
            Phase::Idle
        }
    }

    /// Read the record. Flags count as set only for the literal `"true"`; an
    /// unparsable timestamp reads as absent.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let flag = |key: &str| -> Result<bool, StoreError> {
            Ok(store.get(key)?.as_deref() == Some(keys::TRUE))
        };
        let processing_start_time = match store.get(keys::PROCESSING_START_TIME)? {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(ms) => Some(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparsable processingStartTime");
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            pdf_processing: flag(keys::PDF_PROCESSING)?,
            download_initiated: flag(keys::DOWNLOAD_INITIATED)?,
            processing_start_time,
            show_success_animation: flag(keys::SHOW_SUCCESS_ANIMATION)?,
            suppress_flash_messages: flag(keys::SUPPRESS_FLASH_MESSAGES)?,
        })
    }

    /// Write every field. Unset flags are removed, except `downloadInitiated`
    /// which is stored as `"false"` while processing is in flight.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        write_flag(store, keys::PDF_PROCESSING, self.pdf_processing)?;
        if self.download_initiated {
            store.set(keys::DOWNLOAD_INITIATED, keys::TRUE)?;
        } else if self.pdf_processing {
            store.set(keys::DOWNLOAD_INITIATED, keys::FALSE)?;
        } else {
            store.remove(keys::DOWNLOAD_INITIATED)?;
        }
        match self.processing_start_time {
            Some(ms) => store.set(keys::PROCESSING_START_TIME, &ms.to_string())?,
            None => store.remove(keys::PROCESSING_START_TIME)?,
        }
        write_flag(store, keys::SHOW_SUCCESS_ANIMATION, self.show_success_animation)?;
        write_flag(store, keys::SUPPRESS_FLASH_MESSAGES, self.suppress_flash_messages)?;
        Ok(())
    }

    /// Remove all five keys.
    pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
        for key in keys::ALL {
            store.remove(key)?;
        }
        Ok(())
    }
}

fn write_flag<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    value: bool,
) -> Result<(), StoreError> {
    if value {
        store.set(key, keys::TRUE)
    } else {
        store.remove(key)
    }
}
