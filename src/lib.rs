#![forbid(unsafe_code)]

pub mod cache;
pub mod cli;
pub mod document;
pub mod insight;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod refusal;

pub use cache::{CacheStats, ContentHash, FingerprintCache, content_hash};
pub use document::{Dispatcher, ExtractionError, Extractor, FileType};
pub use insight::{Cluster, MindMap, cluster_by_type, extract_topics, suggest_prompts};
pub use record::{DocumentRecord, word_count};

/// Run the docsift CLI. Returns an exit code (0, 1, or 2).
pub fn run() -> u8 {
    use clap::Parser;

    // Parse CLI args (handles --version and --help via clap, then exits)
    let cli = cli::Cli::parse();

    if cli.describe {
        return handle_describe();
    }

    handle_run_mode(cli)
}

/// Handle --describe flag: print operator metadata and exit.
fn handle_describe() -> u8 {
    let operator = serde_json::json!({
        "name": "docsift",
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "author": "CMD+RVL",
        "pipeline_role": "extractor",
        "input_format": "files",
        "output_format": "JSONL",
        "stdin_support": false,
        "file_support": true,
        "formats": document::FileType::ALL,
        "ocr_formats": document::FileType::ALL
            .iter()
            .filter(|file_type| file_type.is_image())
            .collect::<Vec<_>>(),
        "exit_codes": {"0": "ALL_EXTRACTED", "1": "PARTIAL", "2": "REFUSAL"}
    });

    if let Ok(json) = serde_json::to_string_pretty(&operator) {
        println!("{}", json);
        0
    } else {
        eprintln!("Error: Failed to serialize operator metadata");
        2
    }
}

fn handle_run_mode(cli: cli::Cli) -> u8 {
    use cli::Outcome;
    use document::{OcrConfig, TesseractEngine};
    use pipeline::{IngestOptions, default_jobs, ingest};
    use std::sync::Arc;

    if cli.files.is_empty() {
        output_refusal_envelope(&build_no_input_refusal());
        return Outcome::Refusal.exit_code();
    }

    let uploads = match read_uploads(&cli.files) {
        Ok(uploads) => uploads,
        Err(refusal) => {
            output_refusal_envelope(&refusal);
            return Outcome::Refusal.exit_code();
        }
    };

    let dispatcher = Dispatcher::with_ocr(Box::new(TesseractEngine::new(OcrConfig {
        binary: cli.tesseract,
        language: cli.ocr_lang,
    })));
    let cache = FingerprintCache::new();
    let options = IngestOptions {
        jobs: cli.jobs.unwrap_or_else(default_jobs),
        progress: cli.progress,
        warnings: true,
    };

    let records = ingest(uploads, &cache, &dispatcher, options);
    let outcome = Outcome::from_failures(records.iter().any(|record| !record.is_success()));

    let rows: Vec<&DocumentRecord> = records.iter().map(Arc::as_ref).collect();
    let summary = cli.summary.then(|| output::SummaryLine::from_cache(&cache));

    let mut stdout = std::io::stdout().lock();
    if let Err(error) = write_output(&mut stdout, &rows, summary.as_ref()) {
        eprintln!("Error writing output: {}", error);
        return Outcome::Refusal.exit_code();
    }

    outcome.exit_code()
}

/// Write one JSONL line per record, then the optional summary line.
fn write_output(
    out: &mut dyn std::io::Write,
    rows: &[&DocumentRecord],
    summary: Option<&output::SummaryLine>,
) -> Result<(), String> {
    output::write_jsonl(out, rows)?;
    if let Some(summary) = summary {
        output::write_json_line(out, summary)?;
        out.flush()
            .map_err(|error| format!("failed to flush JSONL output: {error}"))?;
    }
    Ok(())
}

/// Read every input file up front; the first unreadable one refuses the run.
fn read_uploads(
    paths: &[std::path::PathBuf],
) -> Result<Vec<pipeline::Upload>, refusal::RefusalPayload> {
    paths
        .iter()
        .map(|path| {
            pipeline::Upload::from_path(path).map_err(|error| {
                refusal::RefusalPayload::new(
                    refusal::RefusalCode::Io,
                    "Failed to read input file",
                    serde_json::json!({
                        "path": path.display().to_string(),
                        "error": error
                    }),
                    Some("Check the file path and permissions, then rerun docsift"),
                )
            })
        })
        .collect()
}

fn build_no_input_refusal() -> refusal::RefusalPayload {
    refusal::RefusalPayload::new(
        refusal::RefusalCode::BadInput,
        "No input files",
        serde_json::json!({ "files": 0 }),
        Some("docsift <FILE>..."),
    )
}

/// Output a refusal envelope to stdout.
fn output_refusal_envelope(refusal: &refusal::RefusalPayload) {
    if let Ok(json) = serde_json::to_string(refusal) {
        println!("{}", json);
    }
}
