/// In-memory PDF opened for text extraction.
pub struct PdfDocument {
    document: lopdf::Document,
}

impl PdfDocument {
    /// Parse PDF bytes for structural access.
    pub fn load(bytes: &[u8]) -> Result<Self, String> {
        let document =
            lopdf::Document::load_mem(bytes).map_err(|error| format!("failed reading pdf: {error}"))?;
        Ok(Self { document })
    }

    /// Return PDF page count using structural access.
    pub fn page_count(&self) -> u64 {
        self.document.get_pages().len() as u64
    }

    /// Extract the text of one page (1-based page number).
    pub fn page_text(&self, page_number: u32) -> Result<String, String> {
        let text = self
            .document
            .extract_text(&[page_number])
            .map_err(|error| format!("failed extracting text from page {page_number}: {error}"))?;
        Ok(text.trim_end_matches(['\n', '\r']).to_owned())
    }

    /// Concatenate per-page text in page order, one page per line group.
    pub fn text(&self) -> Result<String, String> {
        let mut pages = Vec::new();
        for page_number in self.document.get_pages().keys() {
            pages.push(self.page_text(*page_number)?);
        }
        Ok(pages.join("\n"))
    }
}

pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    PdfDocument::load(bytes)?.text()
}
