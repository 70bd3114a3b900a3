//! Lightweight analysis over a record collection: keyword topics, grouping
//! by file type, and suggested prompts. All functions are pure.

pub mod clusters;
pub mod prompts;
pub mod topics;

pub use clusters::{Cluster, cluster_by_type};
pub use prompts::{BASE_PROMPTS, suggest_prompts};
pub use topics::{MindMap, extract_topics};
