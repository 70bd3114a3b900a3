use crate::cache::FingerprintCache;
use crate::document::Extractor;
use crate::pipeline::parallel::process_parallel;
use crate::progress::reporter::{ProgressTracker, W_EXTRACT, report_warning_code};
use crate::record::DocumentRecord;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Raw bytes of one uploaded file plus the name it arrived under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Read a file from disk; the path as given becomes the filename.
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path)
            .map_err(|error| format!("failed to read '{}': {error}", path.display()))?;
        Ok(Self::new(path.display().to_string(), bytes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub jobs: usize,
    /// Emit a progress event on stderr after each upload.
    pub progress: bool,
    /// Emit a `W_EXTRACT` warning on stderr for each failed upload.
    pub warnings: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            progress: false,
            warnings: true,
        }
    }
}

/// Run every upload through the cache, returning records in input order.
///
/// Failures are folded into their records and never stop the batch.
pub fn ingest(
    uploads: Vec<Upload>,
    cache: &FingerprintCache,
    extractor: &dyn Extractor,
    options: IngestOptions,
) -> Vec<Arc<DocumentRecord>> {
    let tracker = ProgressTracker::start(uploads.len() as u64);
    let processed = AtomicU64::new(0);

    process_parallel(uploads, options.jobs, |upload| {
        let record = cache.lookup_or_compute(&upload.bytes, &upload.filename, extractor);

        if options.warnings
            && let Some(error) = &record.error
        {
            report_warning_code(&upload.filename, Some(W_EXTRACT), &error.to_string());
        }
        let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
        if options.progress {
            tracker.report(done);
        }

        record
    })
}
