use crate::document::FileType;
use crate::record::DocumentRecord;
use std::borrow::Borrow;

/// Upper bound on suggestions returned.
pub const MAX_PROMPTS: usize = 6;

pub const BASE_PROMPTS: [&str; 3] = [
    "Summarize this document",
    "Generate key points",
    "Explain in simple terms",
];

const PDF_PROMPT: &str = "Extract the key findings from this PDF";
const PPTX_PROMPT: &str = "Summarize the main points of each slide";
const MULTI_DOCUMENT_PROMPT: &str = "Compare and contrast the uploaded documents";

/// Analysis prompts for a record collection.
///
/// The generic prompts come first, followed by the type-specific ones
/// (PDF, then PPTX, then multi-document), capped at [`MAX_PROMPTS`].
pub fn suggest_prompts<R: Borrow<DocumentRecord>>(records: &[R]) -> Vec<String> {
    let has_type = |wanted: FileType| {
        records
            .iter()
            .any(|record| record.borrow().file_type == Some(wanted))
    };

    let mut prompts = Vec::with_capacity(BASE_PROMPTS.len() + 3);
    prompts.extend(BASE_PROMPTS);
    if has_type(FileType::Pdf) {
        prompts.push(PDF_PROMPT);
    }
    if has_type(FileType::Pptx) {
        prompts.push(PPTX_PROMPT);
    }
    if records.len() > 1 {
        prompts.push(MULTI_DOCUMENT_PROMPT);
    }

    prompts
        .into_iter()
        .take(MAX_PROMPTS)
        .map(str::to_owned)
        .collect()
}
