use crate::record::DocumentRecord;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Number of topic nodes returned around the center.
pub const MAX_TOPICS: usize = 8;

/// Tokens with this many characters or fewer never become topics.
const MIN_TOKEN_CHARS: usize = 3;

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "because", "been", "before", "being",
    "below", "between", "both", "could", "does", "doing", "down", "during", "each", "from",
    "further", "have", "having", "here", "hers", "herself", "himself", "into", "itself", "just",
    "more", "most", "myself", "only", "other", "ours", "ourselves", "over", "same", "should",
    "some", "such", "than", "that", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "under", "until", "very", "were", "what", "when",
    "where", "which", "while", "whom", "will", "with", "would", "your", "yours", "yourself",
    "yourselves",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Keyword summary of a record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MindMap {
    pub center: String,
    pub nodes: Vec<String>,
}

/// Most frequent non-trivial words across every record's text.
///
/// Ties keep the order in which the words first appeared.
pub fn extract_topics<R: Borrow<DocumentRecord>>(records: &[R]) -> MindMap {
    if records.is_empty() {
        return MindMap {
            center: "No Documents".to_owned(),
            nodes: Vec::new(),
        };
    }

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in records {
        for token in record.borrow().text.split_whitespace() {
            let Some(token) = normalize_token(token) else {
                continue;
            };
            match positions.get(&token) {
                Some(&position) => counts[position].1 += 1,
                None => {
                    positions.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|left, right| right.1.cmp(&left.1));

    MindMap {
        center: center_label(records.len()),
        nodes: counts
            .into_iter()
            .take(MAX_TOPICS)
            .map(|(token, _)| token)
            .collect(),
    }
}

fn normalize_token(token: &str) -> Option<String> {
    let token = token
        .to_lowercase()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .to_owned();
    if token.chars().count() <= MIN_TOKEN_CHARS || STOPWORD_SET.contains(token.as_str()) {
        return None;
    }
    Some(token)
}

fn center_label(document_count: usize) -> String {
    let noun = if document_count == 1 {
        "document"
    } else {
        "documents"
    };
    format!("Key Topics ({document_count} {noun})")
}
