use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;

pub const TOOL_NAME: &str = "docsift";

/// Warning code for uploads whose extraction failed.
pub const W_EXTRACT: &str = "W_EXTRACT";

/// Structured progress event emitted to stderr.
#[derive(Debug, Serialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool: String,
    pub processed: u64,
    pub total: Option<u64>,
    pub percent: Option<f64>,
    pub elapsed_ms: u64,
}

impl ProgressEvent {
    pub fn new(processed: u64, total: Option<u64>, elapsed_ms: u64) -> Self {
        let percent = total
            .filter(|total| *total > 0)
            .map(|total| (processed as f64 / total as f64 * 1000.0).round() / 10.0);
        Self {
            event_type: "progress".to_owned(),
            tool: TOOL_NAME.to_owned(),
            processed,
            total,
            percent,
            elapsed_ms,
        }
    }
}

/// Structured warning emitted to stderr for uploads that failed extraction.
#[derive(Debug, Serialize)]
pub struct WarningEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

/// Emits progress events for a known number of items.
pub struct ProgressTracker {
    started: Instant,
    total: u64,
}

impl ProgressTracker {
    pub fn start(total: u64) -> Self {
        Self {
            started: Instant::now(),
            total,
        }
    }

    pub fn event(&self, processed: u64) -> ProgressEvent {
        let elapsed_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        ProgressEvent::new(processed, Some(self.total), elapsed_ms)
    }

    pub fn report(&self, processed: u64) {
        report_progress(&self.event(processed));
    }
}

/// Report progress to stderr as JSONL.
pub fn report_progress(event: &ProgressEvent) {
    let mut stderr = io::stderr().lock();
    let _ = write_event_line(&mut stderr, event);
}

/// Report a warning to stderr as JSONL with an optional warning code.
pub fn report_warning_code(path: &str, code: Option<&str>, message: &str) {
    let warning = WarningEvent {
        event_type: "warning".to_owned(),
        tool: TOOL_NAME.to_owned(),
        path: path.to_owned(),
        code: code.map(str::to_owned),
        message: message.to_owned(),
    };
    let mut stderr = io::stderr().lock();
    let _ = write_event_line(&mut stderr, &warning);
}

fn write_event_line<T: Serialize>(out: &mut dyn Write, event: &T) -> Result<(), String> {
    serde_json::to_writer(&mut *out, event)
        .map_err(|error| format!("failed to serialize progress event: {error}"))?;
    out.write_all(b"\n")
        .map_err(|error| format!("failed to write progress event newline: {error}"))?;
    out.flush()
        .map_err(|error| format!("failed to flush progress event output: {error}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ProgressEvent, ProgressTracker, WarningEvent, report_warning_code, write_event_line};
    use serde_json::json;
    use std::io::{Cursor, Error, ErrorKind, Write};

    #[test]
    fn serializes_progress_event_shape() {
        let event = ProgressEvent::new(5, Some(200), 3200);

        assert_eq!(
            serde_json::to_value(event).expect("serialize progress event"),
            json!({
                "type": "progress",
                "tool": "docsift",
                "processed": 5,
                "total": 200,
                "percent": 2.5,
                "elapsed_ms": 3200
            })
        );
    }

    #[test]
    fn percent_is_absent_without_a_total() {
        let event = ProgressEvent::new(3, Some(0), 1);
        assert_eq!(event.percent, None);
        let event = ProgressEvent::new(3, None, 1);
        assert_eq!(event.percent, None);
    }

    #[test]
    fn tracker_reports_against_its_total() {
        let tracker = ProgressTracker::start(4);
        let event = tracker.event(4);
        assert_eq!(event.total, Some(4));
        assert_eq!(event.percent, Some(100.0));
    }

    #[test]
    fn serializes_warning_event_with_code() {
        let event = WarningEvent {
            event_type: "warning".to_owned(),
            tool: "docsift".to_owned(),
            path: "/data/corrupt.pdf".to_owned(),
            code: Some("W_EXTRACT".to_owned()),
            message: "Error processing PDF: failed reading pdf".to_owned(),
        };

        assert_eq!(
            serde_json::to_value(event).expect("serialize warning event"),
            json!({
                "type": "warning",
                "tool": "docsift",
                "path": "/data/corrupt.pdf",
                "code": "W_EXTRACT",
                "message": "Error processing PDF: failed reading pdf"
            })
        );
    }

    #[test]
    fn serializes_warning_event_without_code() {
        let event = WarningEvent {
            event_type: "warning".to_owned(),
            tool: "docsift".to_owned(),
            path: "notes.txt".to_owned(),
            code: None,
            message: "skipped".to_owned(),
        };

        let value = serde_json::to_value(event).expect("serialize warning event");
        assert!(value.get("code").is_none());
    }

    #[test]
    fn write_event_line_writes_json_with_newline() {
        let event = ProgressEvent::new(1, None, 2);
        let mut out = Cursor::new(Vec::new());

        write_event_line(&mut out, &event).expect("write progress event");

        let output = String::from_utf8(out.into_inner()).expect("valid UTF-8 output");
        assert_eq!(
            output,
            "{\"type\":\"progress\",\"tool\":\"docsift\",\"processed\":1,\"total\":null,\"percent\":null,\"elapsed_ms\":2}\n"
        );
    }

    #[test]
    fn write_event_line_surfaces_write_errors() {
        struct AlwaysFailWriter;

        impl Write for AlwaysFailWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(Error::new(ErrorKind::BrokenPipe, "write failed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = AlwaysFailWriter;
        let error = write_event_line(&mut writer, &ProgressEvent::new(1, None, 2))
            .expect_err("write should fail");
        assert!(error.contains("failed to serialize progress event"));
    }

    #[test]
    fn report_warning_is_callable() {
        report_warning_code("/tmp/file", Some("W_TEST"), "diagnostic warning");
    }
}
