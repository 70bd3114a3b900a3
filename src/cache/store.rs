use crate::cache::{ContentHash, content_hash};
use crate::document::{Extractor, extension_of};
use crate::record::DocumentRecord;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Hit/miss counters and current size of a [`FingerprintCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

#[derive(Default)]
struct CacheState {
    records: HashMap<ContentHash, Arc<DocumentRecord>>,
    order: Vec<ContentHash>,
}

/// Session-scoped map from content hash to extracted record.
///
/// Identical bytes are extracted once; later uploads of the same bytes get
/// the stored record back regardless of filename. The map lock is not held
/// while extracting, so concurrent misses on one hash may extract twice;
/// the first insert wins and every caller receives that record.
#[derive(Default)]
pub struct FingerprintCache {
    state: Mutex<CacheState>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FingerprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record for `bytes`, extracting and storing it on a miss.
    pub fn lookup_or_compute(
        &self,
        bytes: &[u8],
        filename: &str,
        extractor: &dyn Extractor,
    ) -> Arc<DocumentRecord> {
        let hash = content_hash(bytes);
        if let Some(record) = self.get(&hash) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return record;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let extension = extension_of(filename);
        let outcome = extractor.extract(bytes, &extension);
        let record = Arc::new(DocumentRecord::assemble(
            filename,
            &extension,
            bytes.len() as u64,
            hash.clone(),
            outcome,
            Utc::now(),
        ));

        let mut state = self.lock();
        if let Some(existing) = state.records.get(&hash) {
            return Arc::clone(existing);
        }
        state.records.insert(hash.clone(), Arc::clone(&record));
        state.order.push(hash);
        record
    }

    pub fn get(&self, hash: &ContentHash) -> Option<Arc<DocumentRecord>> {
        self.lock().records.get(hash).cloned()
    }

    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.lock().records.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of stored records in insertion order.
    pub fn records(&self) -> Vec<Arc<DocumentRecord>> {
        let state = self.lock();
        state
            .order
            .iter()
            .filter_map(|hash| state.records.get(hash).cloned())
            .collect()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len() as u64,
        }
    }

    // Records are inserted whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
