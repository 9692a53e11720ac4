//! Overlay mode: writes the rewritten text over a stripped copy of the original PDF.
//!
//! Text and vector drawing are removed from every page; raster images stay. The
//! whole rewritten text is then set into one fixed box per page. There is no
//! pagination: lines that do not fit in the box are dropped, and the output
//! always has exactly as many pages as the input.

use std::collections::HashSet;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, warn};

use crate::render::font_metrics::{get_metrics, StandardFont};
use crate::render::pdf_ops::{font_dictionary, text_operations, PlacedLine};
use crate::render::RenderError;

/// Text box edges in points, measured from the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

pub const OVERLAY_BOX: TextBox = TextBox {
    left: 50.0,
    top: 50.0,
    right: 550.0,
    bottom: 800.0,
};
pub const OVERLAY_FONT: StandardFont = StandardFont::Helvetica;
pub const OVERLAY_FONT_SIZE_PT: f32 = 10.0;
pub const OVERLAY_LEADING_PT: f32 = 12.0;

/// US Letter top edge, used when a page has no readable MediaBox.
const DEFAULT_PAGE_TOP_PT: f32 = 792.0;
/// Guards against cyclic `Parent` chains in malformed page trees.
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Operators that paint raster images or set up the transform for them.
const IMAGE_OPERATORS: &[&str] = &["q", "Q", "cm", "gs", "BI", "ID", "EI"];

/// Lines that fit into the box plus how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxLayout {
    /// Baselines measured downward from the box top.
    pub lines: Vec<(String, f32)>,
    pub clipped_lines: usize,
}

/// Wraps `text` into the overlay box and drops whatever overflows it.
pub fn layout_text_box(text: &str, text_box: TextBox) -> BoxLayout {
    let metrics = get_metrics(OVERLAY_FONT);
    let width = text_box.right - text_box.left;
    let height = text_box.bottom - text_box.top;
    let capacity = (height / OVERLAY_LEADING_PT).floor().max(0.0) as usize;

    let wrapped: Vec<String> = text
        .lines()
        .flat_map(|line| metrics.wrap_line(line, OVERLAY_FONT_SIZE_PT, width))
        .collect();

    let clipped_lines = wrapped.len().saturating_sub(capacity);
    let lines = wrapped
        .into_iter()
        .take(capacity)
        .enumerate()
        .map(|(i, line)| {
            let baseline = OVERLAY_FONT_SIZE_PT + i as f32 * OVERLAY_LEADING_PT;
            (line, baseline)
        })
        .collect();

    BoxLayout {
        lines,
        clipped_lines,
    }
}

/// Strips each page of the original PDF and writes the rewritten text into it.
pub fn render_overlay(original_pdf: &[u8], text: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::load_mem(original_pdf)?;
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(RenderError::NoPages);
    }

    let layout = layout_text_box(text, OVERLAY_BOX);
    if layout.clipped_lines > 0 {
        warn!(
            "Overlay text overflows its box: {} of {} lines clipped on every page",
            layout.clipped_lines,
            layout.clipped_lines + layout.lines.len()
        );
    }

    let font_id = doc.add_object(font_dictionary(OVERLAY_FONT));

    for page_id in &page_ids {
        let page_top = page_top(&doc, *page_id).unwrap_or(DEFAULT_PAGE_TOP_PT);
        let images = image_xobject_names(&doc, *page_id);

        let original_ops = Content::decode(&doc.get_page_content(*page_id)?)?.operations;
        let mut operations = vec![Operation::new("q", vec![])];
        operations.extend(retain_image_operations(original_ops, &images));
        operations.push(Operation::new("Q", vec![]));

        let placed: Vec<PlacedLine> = layout
            .lines
            .iter()
            .map(|(line, baseline)| PlacedLine {
                text: line.clone(),
                font: OVERLAY_FONT,
                size_pt: OVERLAY_FONT_SIZE_PT,
                x: OVERLAY_BOX.left,
                y: page_top - (OVERLAY_BOX.top + baseline),
            })
            .collect();
        operations.extend(text_operations(&placed));

        let encoded = Content { operations }.encode()?;
        let stream_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let resources = resources_with_font(&doc, *page_id, font_id);

        let page = doc.get_object_mut(*page_id)?.as_dict_mut()?;
        page.set("Contents", Object::Reference(stream_id));
        page.set("Resources", Object::Dictionary(resources));
    }

    debug!(
        "Overlay rendered onto {} pages ({} lines each)",
        page_ids.len(),
        layout.lines.len()
    );

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| RenderError::Write(e.to_string()))?;
    Ok(output)
}

/// Keeps only the operators that draw raster images. `Do` survives only when it
/// names an image XObject; form XObjects may carry text and are dropped.
fn retain_image_operations(ops: Vec<Operation>, images: &HashSet<Vec<u8>>) -> Vec<Operation> {
    ops.into_iter()
        .filter(|op| match op.operator.as_str() {
            "Do" => op
                .operands
                .first()
                .and_then(|o| o.as_name().ok())
                .is_some_and(|name| images.contains(name)),
            other => IMAGE_OPERATORS.contains(&other),
        })
        .collect()
}

/// Looks up a page attribute, following `Parent` links for inheritable keys.
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return resolve(doc, value);
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Upper edge of the page's MediaBox in user space. The box may not start at y=0.
fn page_top(doc: &Document, page_id: ObjectId) -> Option<f32> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")?.as_array().ok()?;
    if media_box.len() != 4 {
        return None;
    }
    let lower = as_number(resolve(doc, &media_box[1])?)?;
    let upper = as_number(resolve(doc, &media_box[3])?)?;
    Some(lower.max(upper))
}

fn page_resources(doc: &Document, page_id: ObjectId) -> Dictionary {
    inherited_attribute(doc, page_id, b"Resources")
        .and_then(|r| r.as_dict().ok())
        .cloned()
        .unwrap_or_default()
}

fn image_xobject_names(doc: &Document, page_id: ObjectId) -> HashSet<Vec<u8>> {
    let resources = page_resources(doc, page_id);
    let Some(xobjects) = resources
        .get(b"XObject")
        .ok()
        .and_then(|x| resolve(doc, x))
        .and_then(|x| x.as_dict().ok())
    else {
        return HashSet::new();
    };

    xobjects
        .iter()
        .filter(|(_, obj)| {
            resolve(doc, obj)
                .and_then(|o| o.as_stream().ok())
                .and_then(|s| s.dict.get(b"Subtype").ok())
                .and_then(|s| s.as_name().ok())
                .is_some_and(|subtype| subtype == b"Image")
        })
        .map(|(name, _)| name.clone())
        .collect()
}

/// The page's effective resources with the overlay font added under its resource name.
fn resources_with_font(doc: &Document, page_id: ObjectId, font_id: ObjectId) -> Dictionary {
    let mut resources = page_resources(doc, page_id);
    let mut fonts = resources
        .get(b"Font")
        .ok()
        .and_then(|f| resolve(doc, f))
        .and_then(|f| f.as_dict().ok())
        .cloned()
        .unwrap_or_default();
    fonts.set(OVERLAY_FONT.resource_name(), Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rebuilt::render_rebuilt_pdf;

    /// One Letter page with a text run, a vector rectangle, and an image draw.
    fn pdf_with_text_and_image() -> Vec<u8> {
        pdf_with_media_box([0, 0, 612, 792])
    }

    fn pdf_with_media_box(media_box: [i64; 4]) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(font_dictionary(StandardFont::Helvetica));
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 1,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            vec![0x80],
        ));
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal("ORIGINAL CONTENT")],
                ),
                Operation::new("ET", vec![]),
                Operation::new("re", vec![72.into(), 600.into(), 100.into(), 20.into()]),
                Operation::new("f", vec![]),
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![50.into(), 0.into(), 0.into(), 50.into(), 400.into(), 400.into()],
                ),
                Operation::new("Do", vec!["Im1".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
                "XObject" => dictionary! { "Im1" => image_id },
            },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => media_box.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn first_page_operations(pdf: &[u8]) -> Vec<Operation> {
        let doc = Document::load_mem(pdf).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        Content::decode(&doc.get_page_content(page_id).unwrap())
            .unwrap()
            .operations
    }

    fn shown_strings(ops: &[Operation]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter(|o| o.operator == "Tj")
            .filter_map(|o| match o.operands.first()? {
                Object::String(bytes, _) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_overflow_is_clipped_not_paginated() {
        // Two input pages, well over 2000 characters of rewritten text.
        let input_text: String = (0..120)
            .map(|i| format!("Line {i} of the original resume"))
            .collect::<Vec<_>>()
            .join("\n");
        let original = render_rebuilt_pdf(&input_text).unwrap();
        let input_pages = Document::load_mem(&original).unwrap().get_pages().len();
        assert!(input_pages >= 2);

        let rewritten = "Delivered measurable results across distributed systems. ".repeat(60);
        assert!(rewritten.len() > 2000);
        let output = render_overlay(&original, &rewritten).unwrap();
        let output_pages = Document::load_mem(&output).unwrap().get_pages().len();
        assert_eq!(output_pages, input_pages);
    }

    #[test]
    fn test_original_text_and_vectors_are_removed_images_kept() {
        let output = render_overlay(&pdf_with_text_and_image(), "JANE DOE\nEngineer").unwrap();
        let ops = first_page_operations(&output);

        let shown = shown_strings(&ops);
        assert!(!shown.iter().any(|s| s == b"ORIGINAL CONTENT"));
        assert!(shown.iter().any(|s| s == b"JANE DOE"));
        assert!(shown.iter().any(|s| s == b"Engineer"));

        assert!(!ops.iter().any(|o| o.operator == "re" || o.operator == "f"));
        assert!(ops
            .iter()
            .any(|o| o.operator == "Do" && o.operands[0].as_name().ok() == Some(&b"Im1"[..])));
    }

    #[test]
    fn test_overlay_font_is_registered_on_page() {
        let output = render_overlay(&pdf_with_text_and_image(), "JANE DOE").unwrap();
        let doc = Document::load_mem(&output).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let resources = page_resources(&doc, page_id);
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        assert!(fonts.has(OVERLAY_FONT.resource_name().as_bytes()));
        // Pre-existing resources survive alongside the new font.
        assert!(fonts.has(b"F1"));
        assert!(resources.has(b"XObject"));
    }

    #[test]
    fn test_text_starts_at_box_top_left() {
        let output = render_overlay(&pdf_with_text_and_image(), "JANE DOE").unwrap();
        let ops = first_page_operations(&output);
        let tm = ops.iter().find(|o| o.operator == "Tm").unwrap();
        let x = as_number(&tm.operands[4]).unwrap();
        let y = as_number(&tm.operands[5]).unwrap();
        assert!((x - 50.0).abs() < 1e-3);
        assert!((y - (792.0 - 60.0)).abs() < 1e-3);
    }

    #[test]
    fn test_text_box_follows_offset_media_box() {
        let output = render_overlay(&pdf_with_media_box([0, 100, 612, 892]), "JANE DOE").unwrap();
        let ops = first_page_operations(&output);
        let tm = ops.iter().find(|o| o.operator == "Tm").unwrap();
        let y = as_number(&tm.operands[5]).unwrap();
        assert!((y - (892.0 - 60.0)).abs() < 1e-3);
    }

    #[test]
    fn test_layout_clips_to_capacity() {
        let text = (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let layout = layout_text_box(&text, OVERLAY_BOX);
        let capacity = ((OVERLAY_BOX.bottom - OVERLAY_BOX.top) / OVERLAY_LEADING_PT) as usize;
        assert_eq!(layout.lines.len(), capacity);
        assert_eq!(layout.clipped_lines, 200 - capacity);
        assert_eq!(layout.lines[0].0, "0");
    }

    #[test]
    fn test_layout_short_text_is_not_clipped() {
        let layout = layout_text_box("JANE DOE\n\nSUMMARY", OVERLAY_BOX);
        assert_eq!(layout.clipped_lines, 0);
        assert_eq!(layout.lines.len(), 3);
        assert_eq!(layout.lines[1].0, "");
    }

    #[test]
    fn test_non_pdf_input_is_error() {
        assert!(render_overlay(b"not a pdf", "JANE DOE").is_err());
    }
}
