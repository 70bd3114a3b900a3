pub mod ingest;
pub mod parallel;

pub use ingest::{IngestOptions, Upload, ingest};
pub use parallel::{default_jobs, process_parallel};
