use crate::cache::{CacheStats, ContentHash, FingerprintCache};
use crate::insight::{MindMap, cluster_by_type, extract_topics, suggest_prompts};
use crate::record::DocumentRecord;
use serde::Serialize;
use std::borrow::Borrow;

/// Trailing `--summary` line: insights over the distinct cached records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    #[serde(rename = "type")]
    pub line_type: &'static str,
    pub topics: MindMap,
    pub clusters: Vec<ClusterSummary>,
    pub prompts: Vec<String>,
    pub cache: CacheStats,
}

/// A cluster reduced to the content hashes of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterSummary {
    pub name: String,
    pub documents: Vec<ContentHash>,
}

impl SummaryLine {
    /// Summarize every distinct upload held by `cache`.
    ///
    /// Duplicate uploads share one cache entry, so they count once here.
    pub fn from_cache(cache: &FingerprintCache) -> Self {
        Self::build(&cache.records(), cache.stats())
    }

    pub fn build<R: Borrow<DocumentRecord>>(records: &[R], cache: CacheStats) -> Self {
        let clusters = cluster_by_type(records)
            .into_iter()
            .map(|cluster| ClusterSummary {
                name: cluster.name,
                documents: cluster
                    .documents
                    .iter()
                    .map(|record| record.content_hash.clone())
                    .collect(),
            })
            .collect();

        Self {
            line_type: "summary",
            topics: extract_topics(records),
            clusters,
            prompts: suggest_prompts(records),
            cache,
        }
    }
}
