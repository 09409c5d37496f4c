use std::fmt;

/// Lifecycle phase of the tracked conversion.
///
/// `Idle`, `Processing` and `Downloading` are derived from the persisted
/// record. `Complete` only exists inside the page load that detects it; the
/// same load clears the record, so the next observed phase is `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Processing,
    Downloading,
    Complete,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Processing => "processing",
            Phase::Downloading => "downloading",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
