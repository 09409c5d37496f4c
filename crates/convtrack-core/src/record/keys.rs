//! Store keys of the tracking record.

pub const PDF_PROCESSING: &str = "pdfProcessing";
pub const DOWNLOAD_INITIATED: &str = "downloadInitiated";
pub const PROCESSING_START_TIME: &str = "processingStartTime";
pub const SHOW_SUCCESS_ANIMATION: &str = "showSuccessAnimation";
pub const SUPPRESS_FLASH_MESSAGES: &str = "suppressFlashMessages";

/// Every key the record owns, in the order they are written.
pub const ALL: [&str; 5] = [
    PDF_PROCESSING,
    DOWNLOAD_INITIATED,
    PROCESSING_START_TIME,
    SHOW_SUCCESS_ANIMATION,
    SUPPRESS_FLASH_MESSAGES,
];

pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
