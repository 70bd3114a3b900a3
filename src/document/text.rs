/// Decode bytes as UTF-8 without altering them.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(bytes).map_err(|error| format!("invalid UTF-8 text: {error}"))
}

/// Plain text uploads are returned verbatim.
pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    decode_utf8(bytes).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::extract_text;

    #[test]
    fn returns_content_verbatim() {
        let text = extract_text(b"alpha\n\nbeta  \n").expect("decode text");
        assert_eq!(text, "alpha\n\nbeta  \n");
    }

    #[test]
    fn empty_bytes_decode_to_empty_text() {
        assert_eq!(extract_text(b"").expect("decode empty"), "");
    }

    #[test]
    fn reports_invalid_utf8() {
        let error = extract_text(b"\xFF\xFEoops").expect_err("invalid utf-8");
        assert!(error.contains("invalid UTF-8"));
    }
}
