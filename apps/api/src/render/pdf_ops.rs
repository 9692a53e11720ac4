//! Content-stream building blocks shared by the overlay and rebuilt renderers.

use lopdf::content::Operation;
use lopdf::{dictionary, Dictionary, Object, StringFormat};

use crate::render::font_metrics::StandardFont;

/// One line of text placed at a baseline position, in PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font: StandardFont,
    pub size_pt: f32,
    pub x: f32,
    pub y: f32,
}

/// Font dictionary for a non-embedded standard font with WinAnsi encoding.
pub fn font_dictionary(font: StandardFont) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Emits black text for every placed line. Empty lines produce no operators.
pub fn text_operations(lines: &[PlacedLine]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for line in lines.iter().filter(|l| !l.text.is_empty()) {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(line.font.resource_name().as_bytes().to_vec()),
                Object::Real(line.size_pt),
            ],
        ));
        ops.push(Operation::new(
            "rg",
            vec![0.into(), 0.into(), 0.into()],
        ));
        ops.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                Object::Real(line.x),
                Object::Real(line.y),
            ],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Encodes text for a WinAnsiEncoding font.
///
/// Latin-1 maps directly; common typographic characters map to their WinAnsi
/// slots; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '\t' => b' ',
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2026}' => 0x85, // ellipsis
            '\u{20AC}' => 0x80, // euro
            '\u{2122}' => 0x99, // trademark
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_and_latin1_pass_through() {
        assert_eq!(encode_win_ansi("Jane Doe"), b"Jane Doe".to_vec());
        assert_eq!(encode_win_ansi("José"), vec![b'J', b'o', b's', 0xE9]);
    }

    #[test]
    fn test_typographic_characters_map_to_win_ansi() {
        assert_eq!(encode_win_ansi("\u{2022} a \u{2013} b"), vec![0x95, b' ', b'a', b' ', 0x96, b' ', b'b']);
    }

    #[test]
    fn test_unmappable_characters_become_question_marks() {
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_empty_lines_emit_nothing() {
        let line = PlacedLine {
            text: String::new(),
            font: StandardFont::Helvetica,
            size_pt: 10.0,
            x: 50.0,
            y: 700.0,
        };
        assert!(text_operations(&[line]).is_empty());
    }

    #[test]
    fn test_each_line_is_its_own_text_object() {
        let lines: Vec<PlacedLine> = ["JANE DOE", "Engineer"]
            .iter()
            .enumerate()
            .map(|(i, t)| PlacedLine {
                text: t.to_string(),
                font: StandardFont::Helvetica,
                size_pt: 10.0,
                x: 50.0,
                y: 700.0 - 12.0 * i as f32,
            })
            .collect();
        let ops = text_operations(&lines);
        assert_eq!(ops.iter().filter(|o| o.operator == "BT").count(), 2);
        assert_eq!(ops.iter().filter(|o| o.operator == "Tj").count(), 2);
    }
}
