pub mod reporter;

pub use reporter::{
    ProgressEvent, ProgressTracker, WarningEvent, report_progress, report_warning_code,
};
