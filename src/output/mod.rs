pub mod jsonl;
pub mod summary;

pub use jsonl::{write_json_line, write_jsonl};
pub use summary::{ClusterSummary, SummaryLine};
