pub mod dispatch;
pub mod docx;
pub mod error;
pub mod markdown;
pub mod ocr;
pub mod ooxml;
pub mod pdf;
pub mod pptx;
pub mod text;

pub use dispatch::{Dispatcher, Extractor};
pub use error::ExtractionError;
pub use ocr::{OcrConfig, OcrEngine, OcrError, TesseractEngine};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Closed set of upload formats with a dedicated extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Pptx,
    Txt,
    Md,
    Png,
    Jpg,
    Jpeg,
}

impl FileType {
    pub const ALL: [FileType; 8] = [
        FileType::Pdf,
        FileType::Docx,
        FileType::Pptx,
        FileType::Txt,
        FileType::Md,
        FileType::Png,
        FileType::Jpg,
        FileType::Jpeg,
    ];

    /// Resolve an extension (case-insensitive, leading dot tolerated).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match normalize_extension(extension).as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            "pptx" => Some(FileType::Pptx),
            "txt" | "text" => Some(FileType::Txt),
            "md" | "markdown" => Some(FileType::Md),
            "png" => Some(FileType::Png),
            "jpg" => Some(FileType::Jpg),
            "jpeg" => Some(FileType::Jpeg),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Pptx => "pptx",
            FileType::Txt => "txt",
            FileType::Md => "md",
            FileType::Png => "png",
            FileType::Jpg => "jpg",
            FileType::Jpeg => "jpeg",
        }
    }

    /// Upper-case tag used in cluster names and error messages.
    pub fn label(self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Docx => "DOCX",
            FileType::Pptx => "PPTX",
            FileType::Txt => "TXT",
            FileType::Md => "MD",
            FileType::Png => "PNG",
            FileType::Jpg => "JPG",
            FileType::Jpeg => "JPEG",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, FileType::Png | FileType::Jpg | FileType::Jpeg)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase an extension and drop any leading dots.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Extension of an upload's filename, normalized; empty when absent.
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(normalize_extension)
        .unwrap_or_default()
}
