use crate::document::text::decode_utf8;
use regex::Regex;
use std::sync::LazyLock;

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").expect("valid image regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("valid link regex"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ ]{0,3}#{1,6}[ \t]*").expect("valid heading regex"));
static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("valid bold regex"));
static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("valid italic regex"));
static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_([^_\n]+)_\b").expect("valid italic regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid code regex"));

/// Render markdown bytes as plain text (lossy, best-effort).
pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let raw = decode_utf8(bytes)?;
    Ok(strip_markdown(raw))
}

/// Strip heading, emphasis, code, and link syntax while keeping the text.
pub fn strip_markdown(content: &str) -> String {
    let normalized = convert_setext_to_atx(content);

    let text = IMAGE.replace_all(&normalized, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = BOLD_STARS.replace_all(&text, "$1");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");

    normalize_whitespace(&text)
}

fn convert_setext_to_atx(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut result_lines = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if i + 1 < lines.len() {
            let current_line = lines[i].trim();
            let next_line = lines[i + 1].trim_end();

            // Underline of === or --- turns the previous line into a heading
            if !current_line.is_empty()
                && !next_line.is_empty()
                && (next_line.chars().all(|c| c == '=') || next_line.chars().all(|c| c == '-'))
                && next_line.len() >= current_line.len()
            {
                let level = if next_line.starts_with('=') { 1 } else { 2 };
                result_lines.push(format!("{} {}", "#".repeat(level), current_line));
                i += 2;
                continue;
            }
        }

        result_lines.push(lines[i].to_string());
        i += 1;
    }

    result_lines.join("\n")
}

fn normalize_whitespace(content: &str) -> String {
    let mut result_lines = Vec::new();
    let mut prev_was_blank = false;

    for line in content.lines() {
        let trimmed_line = line.trim_end();
        let is_blank = trimmed_line.is_empty();

        // Collapse consecutive blank lines to one
        if is_blank && prev_was_blank {
            continue;
        }

        result_lines.push(trimmed_line);
        prev_was_blank = is_blank;
    }

    result_lines.join("\n")
}
