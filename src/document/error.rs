use crate::document::FileType;
use serde::Serialize;
use thiserror::Error;

/// Why an upload produced no usable text.
///
/// The display strings double as the record text for failed uploads, so
/// they are stable and human readable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code")]
pub enum ExtractionError {
    /// Extension outside the supported set.
    #[serde(rename = "E_UNSUPPORTED")]
    #[error("Unsupported file type")]
    UnsupportedFormat { extension: String },

    /// The format parser rejected the bytes.
    #[serde(rename = "E_EXTRACT")]
    #[error("Error processing {}: {cause}", .file_type.label())]
    Failed { file_type: FileType, cause: String },

    /// Text formats whose bytes are not valid UTF-8.
    #[serde(rename = "E_DECODE")]
    #[error("Error processing {}: {cause}", .file_type.label())]
    Decode { file_type: FileType, cause: String },

    /// No OCR engine could be run for an image upload.
    #[serde(rename = "E_OCR_UNAVAILABLE")]
    #[error("Error processing image: {cause}")]
    OcrUnavailable { cause: String },
}

impl ExtractionError {
    pub fn failed(file_type: FileType, cause: impl Into<String>) -> Self {
        ExtractionError::Failed {
            file_type,
            cause: cause.into(),
        }
    }

    pub fn decode(file_type: FileType, cause: impl Into<String>) -> Self {
        ExtractionError::Decode {
            file_type,
            cause: cause.into(),
        }
    }

    /// Stable machine-readable code, mirrored in the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::UnsupportedFormat { .. } => "E_UNSUPPORTED",
            ExtractionError::Failed { .. } => "E_EXTRACT",
            ExtractionError::Decode { .. } => "E_DECODE",
            ExtractionError::OcrUnavailable { .. } => "E_OCR_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExtractionError;
    use crate::document::FileType;
    use serde_json::json;

    #[test]
    fn unsupported_format_displays_the_fixed_sentinel() {
        let error = ExtractionError::UnsupportedFormat {
            extension: "xyz".to_owned(),
        };
        assert_eq!(error.to_string(), "Unsupported file type");
    }

    #[test]
    fn failures_name_the_format_and_cause() {
        let error = ExtractionError::failed(FileType::Pdf, "missing trailer");
        assert_eq!(error.to_string(), "Error processing PDF: missing trailer");

        let error = ExtractionError::decode(FileType::Txt, "invalid UTF-8");
        assert_eq!(error.to_string(), "Error processing TXT: invalid UTF-8");
    }

    #[test]
    fn serializes_with_code_tag() {
        let error = ExtractionError::failed(FileType::Docx, "bad zip");
        assert_eq!(
            serde_json::to_value(&error).expect("serialize error"),
            json!({
                "code": "E_EXTRACT",
                "file_type": "docx",
                "cause": "bad zip"
            })
        );
        assert_eq!(error.code(), "E_EXTRACT");
    }
}
