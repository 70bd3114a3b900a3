use crate::document::FileType;
use crate::record::DocumentRecord;
use serde::Serialize;
use std::borrow::Borrow;

/// Documents that share a file type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster<'a> {
    pub name: String,
    pub documents: Vec<&'a DocumentRecord>,
}

/// Group records by file type, in the order each type is first seen.
///
/// Fewer than two records form a single "Single Document" cluster.
/// Records without a supported type share "Other Documents".
pub fn cluster_by_type<R: Borrow<DocumentRecord>>(records: &[R]) -> Vec<Cluster<'_>> {
    if records.len() < 2 {
        return vec![Cluster {
            name: "Single Document".to_owned(),
            documents: records.iter().map(|record| record.borrow()).collect(),
        }];
    }

    let mut keys: Vec<Option<FileType>> = Vec::new();
    let mut clusters: Vec<Cluster<'_>> = Vec::new();
    for record in records {
        let record = record.borrow();
        match keys.iter().position(|key| *key == record.file_type) {
            Some(index) => clusters[index].documents.push(record),
            None => {
                keys.push(record.file_type);
                clusters.push(Cluster {
                    name: cluster_name(record.file_type),
                    documents: vec![record],
                });
            }
        }
    }
    clusters
}

fn cluster_name(file_type: Option<FileType>) -> String {
    match file_type {
        Some(file_type) => format!("{} Documents", file_type.label()),
        None => "Other Documents".to_owned(),
    }
}
