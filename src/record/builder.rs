use crate::cache::{ContentHash, content_hash};
use crate::document::{ExtractionError, FileType, normalize_extension};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Extracted text plus metadata for one distinct upload.
///
/// Records are immutable once built; the cache shares them behind `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    /// Name of the upload that first produced this record.
    pub filename: String,
    /// `None` when the extension is outside the supported set.
    pub file_type: Option<FileType>,
    pub extension: String,
    pub size_bytes: u64,
    /// Extracted content, or the failure message when extraction failed.
    pub text: String,
    pub word_count: u64,
    pub processed_at: DateTime<Utc>,
    pub content_hash: ContentHash,
    pub error: Option<ExtractionError>,
}

impl DocumentRecord {
    /// Build a record stamped with the current time.
    pub fn build(
        filename: &str,
        extension: &str,
        bytes: &[u8],
        outcome: Result<String, ExtractionError>,
    ) -> Self {
        Self::build_at(filename, extension, bytes, outcome, Utc::now())
    }

    pub fn build_at(
        filename: &str,
        extension: &str,
        bytes: &[u8],
        outcome: Result<String, ExtractionError>,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self::assemble(
            filename,
            extension,
            bytes.len() as u64,
            content_hash(bytes),
            outcome,
            processed_at,
        )
    }

    /// Build from a hash the caller already computed.
    pub(crate) fn assemble(
        filename: &str,
        extension: &str,
        size_bytes: u64,
        content_hash: ContentHash,
        outcome: Result<String, ExtractionError>,
        processed_at: DateTime<Utc>,
    ) -> Self {
        let extension = normalize_extension(extension);
        let (text, error) = match outcome {
            Ok(text) => (text, None),
            Err(error) => (error.to_string(), Some(error)),
        };

        Self {
            filename: filename.to_owned(),
            file_type: FileType::from_extension(&extension),
            extension,
            size_bytes,
            word_count: word_count(&text),
            text,
            processed_at,
            content_hash,
            error,
        }
    }

    /// Extracted text, or the tagged failure.
    pub fn outcome(&self) -> Result<&str, &ExtractionError> {
        match &self.error {
            Some(error) => Err(error),
            None => Ok(&self.text),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Count whitespace-delimited tokens.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn builds_success_record_metadata() {
        let record = DocumentRecord::build_at(
            "notes.TXT",
            ".TXT",
            b"alpha beta\ngamma",
            Ok("alpha beta\ngamma".to_owned()),
            fixed_time(),
        );

        assert_eq!(record.filename, "notes.TXT");
        assert_eq!(record.extension, "txt");
        assert_eq!(record.file_type, Some(FileType::Txt));
        assert_eq!(record.size_bytes, 16);
        assert_eq!(record.word_count, 3);
        assert_eq!(record.content_hash, content_hash(b"alpha beta\ngamma"));
        assert_eq!(record.outcome(), Ok("alpha beta\ngamma"));
        assert!(record.is_success());
    }

    #[test]
    fn failed_record_uses_error_message_as_text() {
        let record = DocumentRecord::build_at(
            "mystery.xyz",
            "xyz",
            b"???",
            Err(ExtractionError::UnsupportedFormat {
                extension: "xyz".to_owned(),
            }),
            fixed_time(),
        );

        assert_eq!(record.text, "Unsupported file type");
        assert_eq!(record.word_count, 3);
        assert_eq!(record.file_type, None);
        assert!(!record.is_success());
        assert_eq!(
            record.outcome().expect_err("failed record").code(),
            "E_UNSUPPORTED"
        );
    }

    #[test]
    fn empty_text_has_zero_words() {
        let record = DocumentRecord::build("empty.txt", "txt", b"", Ok(String::new()));
        assert_eq!(record.word_count, 0);
        assert_eq!(record.size_bytes, 0);
        assert_eq!(record.text, "");
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one\ttwo\nthree  four"), 4);
    }

    #[test]
    fn serializes_record_fields() {
        let record = DocumentRecord::build_at(
            "deck.pptx",
            "pptx",
            b"bytes",
            Err(ExtractionError::failed(FileType::Pptx, "bad zip")),
            fixed_time(),
        );

        let value = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(value["file_type"], "pptx");
        assert_eq!(value["processed_at"], "2024-06-15T12:30:00Z");
        assert_eq!(value["text"], "Error processing PPTX: bad zip");
        assert_eq!(value["content_hash"], json!(content_hash(b"bytes").as_str()));
        assert_eq!(
            value["error"],
            json!({"code": "E_EXTRACT", "file_type": "pptx", "cause": "bad zip"})
        );
    }
}
