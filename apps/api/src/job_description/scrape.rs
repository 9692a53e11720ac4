//! Best-effort HTML de-boilerplating. Not a structured job-posting parser.

use scraper::{Html, Node};

/// Elements whose text never reaches the description.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Converts an HTML page to a single line of descriptive text.
///
/// Text nodes outside `<script>`/`<style>` are concatenated in document order,
/// split into lines, then each line is split again on double-space runs; the
/// trimmed, non-empty fragments are joined with single spaces.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !skipped {
            raw.push_str(text);
        }
    }

    collapse_whitespace(&raw)
}

pub(crate) fn collapse_whitespace(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_content_is_excluded() {
        assert_eq!(
            html_to_text("<script>alert(1)</script>Hello World"),
            "Hello World"
        );
    }

    #[test]
    fn test_style_content_is_excluded() {
        let html = "<html><head><style>body { color: red; }</style></head>\
                    <body><p>Rust Engineer</p></body></html>";
        assert_eq!(html_to_text(html), "Rust Engineer");
    }

    #[test]
    fn test_lines_are_joined_with_single_spaces() {
        let html = "<div>\n   Senior Engineer\n\n\n   Remote, US   \n</div>";
        assert_eq!(html_to_text(html), "Senior Engineer Remote, US");
    }

    #[test]
    fn test_double_space_runs_split_fragments() {
        assert_eq!(collapse_whitespace("Rust    Go  SQL"), "Rust Go SQL");
    }

    #[test]
    fn test_single_spaces_inside_fragment_are_kept() {
        assert_eq!(collapse_whitespace("  five years of Rust  "), "five years of Rust");
    }

    #[test]
    fn test_adjacent_text_nodes_concatenate_without_separator() {
        assert_eq!(html_to_text("<p>Rust</p><p>Go</p>"), "RustGo");
    }

    #[test]
    fn test_nested_script_in_body_is_excluded() {
        let html = "<body><div>Apply now<script>var x = 'tracking';</script></div></body>";
        assert_eq!(html_to_text(html), "Apply now");
    }

    #[test]
    fn test_empty_document_is_empty() {
        assert_eq!(html_to_text(""), "");
    }
}
