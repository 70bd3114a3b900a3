//! Minimal access to Office Open XML packages (docx, pptx).
//!
//! Parts are read straight out of the zip container and scanned as a flat
//! stream of tags and text. Only the handful of elements that carry text are
//! interpreted by callers; everything else is skipped.

use std::io::{Cursor, Read};
use zip::ZipArchive;

pub type Package<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Open an OOXML zip container held in memory.
pub fn open(bytes: &[u8]) -> Result<Package<'_>, String> {
    ZipArchive::new(Cursor::new(bytes)).map_err(|error| format!("invalid zip container: {error}"))
}

/// Read a package part as UTF-8 XML.
pub fn read_part(package: &mut Package<'_>, name: &str) -> Result<String, String> {
    let mut part = package
        .by_name(name)
        .map_err(|error| format!("missing part '{name}': {error}"))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|error| format!("failed reading part '{name}': {error}"))?;
    Ok(xml)
}

/// Read a part if present; `Ok(None)` when the package does not contain it.
pub fn read_optional_part(package: &mut Package<'_>, name: &str) -> Result<Option<String>, String> {
    if package.index_for_name(name).is_none() {
        return Ok(None);
    }
    read_part(package, name).map(Some)
}

/// One lexical unit of an XML part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent<'a> {
    Open {
        name: &'a str,
        attributes: &'a str,
        self_closing: bool,
    },
    Close {
        name: &'a str,
    },
    Text(&'a str),
}

/// Split XML into open/close tags and raw text runs.
///
/// Declarations, comments, processing instructions, and CDATA markers are
/// dropped. Text is returned undecoded; see [`decode_entities`].
pub fn events(xml: &str) -> Vec<XmlEvent<'_>> {
    let mut events = Vec::new();
    let mut rest = xml;

    while !rest.is_empty() {
        let Some(start) = rest.find('<') else {
            events.push(XmlEvent::Text(rest));
            break;
        };
        if start > 0 {
            events.push(XmlEvent::Text(&rest[..start]));
        }
        rest = &rest[start..];

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }
        if let Some(after) = rest.strip_prefix("<![CDATA[") {
            let end = after.find("]]>").unwrap_or(after.len());
            events.push(XmlEvent::Text(&after[..end]));
            rest = after.get(end + 3..).unwrap_or("");
            continue;
        }

        let Some(end) = tag_end(rest) else {
            break;
        };
        let tag = &rest[1..end];
        rest = &rest[end + 1..];

        if tag.starts_with('?') || tag.starts_with('!') {
            continue;
        }
        if let Some(name) = tag.strip_prefix('/') {
            events.push(XmlEvent::Close { name: name.trim() });
            continue;
        }

        let self_closing = tag.ends_with('/');
        let body = tag.trim_end_matches('/');
        let name_end = body
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(body.len());
        events.push(XmlEvent::Open {
            name: &body[..name_end],
            attributes: &body[name_end..],
            self_closing,
        });
    }

    events
}

/// Byte offset of the `>` closing the tag at the start of `tag`.
///
/// A `>` inside a quoted attribute value does not end the tag.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (index, c) in tag.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(open), _) if c == open => quote = None,
            (None, '>') => return Some(index),
            _ => {}
        }
    }
    None
}

/// Look up an attribute value in a raw attribute string.
pub fn attribute(attributes: &str, key: &str) -> Option<String> {
    let mut rest = attributes;
    while let Some(position) = rest.find(key) {
        let preceded_ok = rest[..position]
            .chars()
            .last()
            .is_none_or(|c| c.is_ascii_whitespace());
        let after = rest[position + key.len()..].trim_start();
        if preceded_ok && let Some(value) = after.strip_prefix('=') {
            let value = value.trim_start();
            let quote = value.chars().next()?;
            if quote == '"' || quote == '\'' {
                let inner = &value[1..];
                let close = inner.find(quote)?;
                return Some(decode_entities(&inner[..close]));
            }
        }
        rest = &rest[position + key.len()..];
    }
    None
}

/// Replace the predefined XML entities and numeric character references.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(position) = rest.find('&') {
        decoded.push_str(&rest[..position]);
        rest = &rest[position..];

        let replacement = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let character = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            character.map(|character| (character, end))
        });

        match replacement {
            Some((character, end)) => {
                decoded.push(character);
                rest = &rest[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}
