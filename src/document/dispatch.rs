use crate::document::{
    ExtractionError, FileType, OcrEngine, TesseractEngine, docx, markdown, ocr, pdf, pptx, text,
};

/// Converts raw upload bytes into plain text.
///
/// The cache is generic over this so callers can substitute their own
/// extraction (or count invocations in tests).
pub trait Extractor: Send + Sync {
    fn extract(&self, bytes: &[u8], extension: &str) -> Result<String, ExtractionError>;
}

/// Format dispatch from extension to the matching reader.
pub struct Dispatcher {
    ocr: Box<dyn OcrEngine>,
}

impl Dispatcher {
    /// Dispatcher using the default tesseract engine for images.
    pub fn new() -> Self {
        Self::with_ocr(Box::new(TesseractEngine::default()))
    }

    pub fn with_ocr(ocr: Box<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    /// Extract text for an already resolved file type.
    pub fn extract_as(&self, file_type: FileType, bytes: &[u8]) -> Result<String, ExtractionError> {
        match file_type {
            FileType::Pdf => {
                pdf::extract_text(bytes).map_err(|cause| ExtractionError::failed(file_type, cause))
            }
            FileType::Docx => {
                docx::extract_text(bytes).map_err(|cause| ExtractionError::failed(file_type, cause))
            }
            FileType::Pptx => {
                pptx::extract_text(bytes).map_err(|cause| ExtractionError::failed(file_type, cause))
            }
            FileType::Txt => {
                text::extract_text(bytes).map_err(|cause| ExtractionError::decode(file_type, cause))
            }
            FileType::Md => markdown::extract_text(bytes)
                .map_err(|cause| ExtractionError::decode(file_type, cause)),
            FileType::Png | FileType::Jpg | FileType::Jpeg => {
                ocr::extract_text(self.ocr.as_ref(), file_type, bytes)
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for Dispatcher {
    fn extract(&self, bytes: &[u8], extension: &str) -> Result<String, ExtractionError> {
        match FileType::from_extension(extension) {
            Some(file_type) => self.extract_as(file_type, bytes),
            None => Err(ExtractionError::UnsupportedFormat {
                extension: crate::document::normalize_extension(extension),
            }),
        }
    }
}
