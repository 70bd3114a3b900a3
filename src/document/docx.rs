use crate::document::ooxml::{self, XmlEvent};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from a Word document, one paragraph per line.
pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let mut package = ooxml::open(bytes)?;
    let xml = ooxml::read_part(&mut package, DOCUMENT_PART)?;
    Ok(paragraphs(&xml).join("\n"))
}

/// Collect the text of every `w:p` in document order.
///
/// Runs are concatenated; `w:tab` becomes a tab and `w:br`/`w:cr` a newline.
/// Tab stops declared inside paragraph or run properties are ignored.
fn paragraphs(xml: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut properties_depth = 0usize;
    let mut in_text = false;

    for event in ooxml::events(xml) {
        match event {
            XmlEvent::Open {
                name: "w:p",
                self_closing: true,
                ..
            } => paragraphs.push(String::new()),
            XmlEvent::Open { name: "w:p", .. } => open.push(String::new()),
            XmlEvent::Close { name: "w:p" } => {
                if let Some(paragraph) = open.pop() {
                    paragraphs.push(paragraph);
                }
            }
            XmlEvent::Open {
                name: "w:pPr" | "w:rPr",
                self_closing: false,
                ..
            } => properties_depth += 1,
            XmlEvent::Close {
                name: "w:pPr" | "w:rPr",
            } => properties_depth = properties_depth.saturating_sub(1),
            XmlEvent::Open {
                name: "w:t",
                self_closing,
                ..
            } => in_text = !self_closing,
            XmlEvent::Close { name: "w:t" } => in_text = false,
            XmlEvent::Open {
                name: "w:tab", ..
            } if properties_depth == 0 => push_to(&mut open, "\t"),
            XmlEvent::Open {
                name: "w:br" | "w:cr",
                ..
            } if properties_depth == 0 => push_to(&mut open, "\n"),
            XmlEvent::Text(text) if in_text => push_to(&mut open, &ooxml::decode_entities(text)),
            _ => {}
        }
    }

    paragraphs
}

fn push_to(open: &mut [String], text: &str) {
    if let Some(paragraph) = open.last_mut() {
        paragraph.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ooxml::tests::build_package;

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    #[test]
    fn joins_paragraphs_with_newlines() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>First</w:t></w:r><w:r><w:t xml:space="preserve"> paragraph</w:t></w:r></w:p><w:p><w:r><w:t>Second</w:t></w:r></w:p>"#,
        );
        let bytes = build_package(&[("word/document.xml", xml.as_str())]);

        assert_eq!(
            extract_text(&bytes).expect("extract docx"),
            "First paragraph\nSecond"
        );
    }

    #[test]
    fn keeps_empty_paragraphs_as_blank_lines() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>Top</w:t></w:r></w:p><w:p/><w:p w:rsidR="00AB"></w:p><w:p><w:r><w:t>Bottom</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs(&xml), vec!["Top", "", "", "Bottom"]);
    }

    #[test]
    fn maps_tabs_and_breaks_but_ignores_tab_stops() {
        let xml = document_xml(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Name</w:t><w:tab/><w:t>Value</w:t><w:br/><w:t>Next</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs(&xml), vec!["Name\tValue\nNext"]);
    }

    #[test]
    fn decodes_entities_in_runs() {
        let xml = document_xml(r#"<w:p><w:r><w:t>R&amp;D &lt;draft&gt;</w:t></w:r></w:p>"#);
        assert_eq!(paragraphs(&xml), vec!["R&D <draft>"]);
    }

    #[test]
    fn includes_table_cell_paragraphs() {
        let xml = document_xml(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        assert_eq!(paragraphs(&xml), vec!["Cell"]);
    }

    #[test]
    fn missing_document_part_is_an_error() {
        let bytes = build_package(&[("word/styles.xml", "<w:styles/>")]);
        let error = extract_text(&bytes).expect_err("missing document part");
        assert!(error.contains("word/document.xml"));
    }

    #[test]
    fn non_zip_bytes_are_an_error() {
        let error = extract_text(b"%PDF-1.4").expect_err("not a zip");
        assert!(error.contains("invalid zip container"));
    }
}
