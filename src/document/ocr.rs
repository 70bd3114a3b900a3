//! Optical character recognition for image uploads.
//!
//! Images are decoded in-process; recognition is delegated to an
//! [`OcrEngine`]. The default engine shells out to the `tesseract` binary.

use crate::document::{ExtractionError, FileType};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::process::Command;
use tempfile::TempDir;
use thiserror::Error;

pub const DEFAULT_TESSERACT_BINARY: &str = "tesseract";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    Unavailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recognizes text in a decoded image.
pub trait OcrEngine: Send + Sync {
    /// Engine name, e.g. "tesseract".
    fn name(&self) -> &str;

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Settings for the tesseract engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    /// Binary name or path.
    pub binary: String,
    /// Tesseract language code(s), e.g. "eng" or "eng+deu".
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_TESSERACT_BINARY.to_owned(),
            language: DEFAULT_OCR_LANGUAGE.to_owned(),
        }
    }
}

/// Tesseract OCR via its command-line interface.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        // Staged as PNG so tesseract sees one lossless input format.
        let temp_dir = TempDir::new()?;
        let image_path = temp_dir.path().join("upload.png");
        image
            .save_with_format(&image_path, ImageFormat::Png)
            .map_err(|error| OcrError::Failed(format!("failed to stage image: {error}")))?;

        let output = Command::new(&self.config.binary)
            .arg(&image_path)
            .arg("stdout")
            .args(["-l", &self.config.language])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(OcrError::Failed(format!(
                    "{} exited with {}: {}",
                    self.config.binary,
                    output.status,
                    stderr.trim()
                )))
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::Unavailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.config.binary
                )))
            }
            Err(error) => Err(OcrError::Io(error)),
        }
    }
}

/// Decode an image upload and run OCR over it.
pub fn extract_text(
    engine: &dyn OcrEngine,
    file_type: FileType,
    bytes: &[u8],
) -> Result<String, ExtractionError> {
    let image = decode_image(bytes).map_err(|error| {
        ExtractionError::failed(file_type, format!("failed to decode image: {error}"))
    })?;

    match engine.recognize(&image) {
        Ok(text) => Ok(text.trim_end().to_owned()),
        Err(OcrError::Unavailable(cause)) => Err(ExtractionError::OcrUnavailable { cause }),
        Err(error) => Err(ExtractionError::failed(file_type, error.to_string())),
    }
}

/// Decode by content signature, so a PNG saved as `.jpg` still decodes.
fn decode_image(bytes: &[u8]) -> image::ImageResult<DynamicImage> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
}
