use crate::document::ooxml::{self, Package, XmlEvent};

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
const SLIDE_PREFIX: &str = "ppt/slides/slide";

/// Extract slide text: a `Slide {n}:` header per slide, then each shape's
/// text on its own line, then a blank line.
pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let mut package = ooxml::open(bytes)?;
    let slides = slide_parts(&mut package)?;

    let mut text = String::new();
    for (index, part) in slides.iter().enumerate() {
        let xml = ooxml::read_part(&mut package, part)?;
        text.push_str(&format!("Slide {}:\n", index + 1));
        for shape in shape_texts(&xml) {
            text.push_str(&shape);
            text.push('\n');
        }
        text.push('\n');
    }

    Ok(text)
}

/// Slide part names in presentation order.
///
/// Follows the `p:sldIdLst` of the presentation part through its
/// relationships; packages without that metadata fall back to slide number
/// order.
fn slide_parts(package: &mut Package<'_>) -> Result<Vec<String>, String> {
    if let Some(ordered) = presentation_order(package)?
        && !ordered.is_empty()
    {
        return Ok(ordered);
    }

    let mut numbered: Vec<(u32, String)> = package
        .file_names()
        .filter_map(|name| slide_number(name).map(|number| (number, name.to_owned())))
        .collect();
    numbered.sort();
    Ok(numbered.into_iter().map(|(_, name)| name).collect())
}

fn presentation_order(package: &mut Package<'_>) -> Result<Option<Vec<String>>, String> {
    let Some(presentation) = ooxml::read_optional_part(package, PRESENTATION_PART)? else {
        return Ok(None);
    };
    let Some(relationships) = ooxml::read_optional_part(package, PRESENTATION_RELS_PART)? else {
        return Ok(None);
    };

    let targets: Vec<(String, String)> = ooxml::events(&relationships)
        .into_iter()
        .filter_map(|event| match event {
            XmlEvent::Open {
                name: "Relationship",
                attributes,
                ..
            } => Some((
                ooxml::attribute(attributes, "Id")?,
                ooxml::attribute(attributes, "Target")?,
            )),
            _ => None,
        })
        .collect();

    let mut ordered = Vec::new();
    for event in ooxml::events(&presentation) {
        let XmlEvent::Open {
            name: "p:sldId",
            attributes,
            ..
        } = event
        else {
            continue;
        };
        let Some(relationship_id) = ooxml::attribute(attributes, "r:id") else {
            continue;
        };
        let Some((_, target)) = targets.iter().find(|(id, _)| *id == relationship_id) else {
            continue;
        };
        let part = resolve_target(target);
        if package.index_for_name(&part).is_some() {
            ordered.push(part);
        }
    }

    Ok(Some(ordered))
}

/// Resolve a relationship target of the presentation part to a part name.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_owned(),
        None => format!("ppt/{}", target.trim_start_matches("./")),
    }
}

fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix(SLIDE_PREFIX)?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

#[derive(Default)]
struct ShapeText {
    has_text_body: bool,
    paragraphs: Vec<String>,
    current: Option<String>,
}

/// Text of every text-bearing shape (`p:sp` with a `p:txBody`) in a slide.
///
/// Paragraphs within a shape are joined with newlines.
fn shape_texts(xml: &str) -> Vec<String> {
    let mut shapes = Vec::new();
    let mut shape: Option<ShapeText> = None;
    let mut in_text = false;

    for event in ooxml::events(xml) {
        match event {
            XmlEvent::Open {
                name: "p:sp",
                self_closing: false,
                ..
            } => shape = Some(ShapeText::default()),
            XmlEvent::Close { name: "p:sp" } => {
                if let Some(finished) = shape.take()
                    && finished.has_text_body
                {
                    shapes.push(finished.paragraphs.join("\n"));
                }
            }
            XmlEvent::Open {
                name: "p:txBody", ..
            } => {
                if let Some(shape) = shape.as_mut() {
                    shape.has_text_body = true;
                }
            }
            XmlEvent::Open {
                name: "a:p",
                self_closing,
                ..
            } => {
                if let Some(shape) = shape.as_mut() {
                    if self_closing {
                        shape.paragraphs.push(String::new());
                    } else {
                        shape.current = Some(String::new());
                    }
                }
            }
            XmlEvent::Close { name: "a:p" } => {
                if let Some(shape) = shape.as_mut()
                    && let Some(paragraph) = shape.current.take()
                {
                    shape.paragraphs.push(paragraph);
                }
            }
            XmlEvent::Open {
                name: "a:t",
                self_closing,
                ..
            } => in_text = !self_closing,
            XmlEvent::Close { name: "a:t" } => in_text = false,
            XmlEvent::Open { name: "a:br", .. } => push_to(shape.as_mut(), "\n"),
            XmlEvent::Text(text) if in_text => {
                push_to(shape.as_mut(), &ooxml::decode_entities(text));
            }
            _ => {}
        }
    }

    shapes
}

fn push_to(shape: Option<&mut ShapeText>, text: &str) {
    if let Some(paragraph) = shape.and_then(|shape| shape.current.as_mut()) {
        paragraph.push_str(text);
    }
}
