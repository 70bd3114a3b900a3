use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use docsift::document::Extractor;
use docsift::{DocumentRecord, ExtractionError, FingerprintCache, content_hash, extract_topics};
use std::sync::Arc;

/// Extraction stand-in so the benchmark measures hashing and lookup only.
struct PassthroughExtractor;

impl Extractor for PassthroughExtractor {
    fn extract(&self, bytes: &[u8], _extension: &str) -> Result<String, ExtractionError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

fn sample_text(words: usize) -> String {
    const VOCABULARY: &[&str] = &[
        "revenue", "forecast", "pipeline", "kernel", "budget", "schedule", "network", "quarterly",
        "the", "and", "with", "analysis",
    ];
    (0..words)
        .map(|index| VOCABULARY[index % VOCABULARY.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_content_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_hash");
    for size in [1_024usize, 64 * 1_024, 1_024 * 1_024] {
        let bytes = vec![0x5a_u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| content_hash(black_box(bytes)));
        });
    }
    group.finish();
}

fn bench_cache_hit(c: &mut Criterion) {
    let cache = FingerprintCache::new();
    let extractor = PassthroughExtractor;
    let bytes = sample_text(2_000).into_bytes();
    cache.lookup_or_compute(&bytes, "warm.txt", &extractor);

    let mut group = c.benchmark_group("cache");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("lookup_hit", |b| {
        b.iter(|| cache.lookup_or_compute(black_box(&bytes), "warm.txt", &extractor));
    });
    group.bench_function("lookup_miss", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            let fresh = FingerprintCache::new();
            let mut unique = bytes.clone();
            unique.extend_from_slice(&counter.to_le_bytes());
            fresh.lookup_or_compute(black_box(&unique), "cold.txt", &extractor)
        });
    });
    group.finish();
}

fn bench_extract_topics(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_topics");
    for documents in [1usize, 10, 100] {
        let records: Vec<Arc<DocumentRecord>> = (0..documents)
            .map(|index| {
                let text = sample_text(500);
                Arc::new(DocumentRecord::build(
                    &format!("doc{index}.txt"),
                    "txt",
                    text.as_bytes(),
                    Ok(text.clone()),
                ))
            })
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(documents),
            &records,
            |b, records| {
                b.iter(|| extract_topics(black_box(records)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_content_hash, bench_cache_hit, bench_extract_topics);
criterion_main!(benches);
