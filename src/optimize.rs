//! Textual markup optimizer.
//!
//! Works on markup text rather than on a [`Document`](crate::Document):
//! it only touches whitespace and a fixed set of removable tokens, never
//! element or attribute structure.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\t\n\r\x0C ]+").unwrap());
static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RE_DOCTYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!DOCTYPE[^>]*>").unwrap());
static RE_XML_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\?xml(?:\s.*?)?\?>").unwrap());
static RE_VERSION_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#" version="[^"]*""#).unwrap());
static RE_XLINK_NS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#" xmlns:xlink="[^"]*""#).unwrap());
static RE_STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"style="[^"]*""#).unwrap());

/// Minify SVG markup.
///
/// In order: whitespace runs become one space, whitespace between tags is
/// dropped, comments/DOCTYPE/XML declaration and `version`/`xmlns:xlink`
/// attributes are stripped, and spaces after `:` and `;` inside `style`
/// values are removed. The pass repeats until nothing changes, so
/// `optimize_markup(&optimize_markup(m)) == optimize_markup(m)`.
pub fn optimize_markup(markup: &str) -> String {
    let mut out = optimize_pass(markup);

    // A removal can splice together a new removable token.
    loop {
        let next = optimize_pass(&out);
        if next == out {
            return out;
        }
        out = next;
    }
}

fn optimize_pass(markup: &str) -> String {
    let out = collapse(markup);
    let out = strip_tokens(&out);
    // Stripping can leave double spaces or `> <` behind.
    let out = collapse(&out);
    compact_styles(&out).into_owned()
}

fn collapse(markup: &str) -> String {
    let spaced = RE_WHITESPACE.replace_all(markup, " ");
    spaced.replace("> <", "><")
}

fn strip_tokens(markup: &str) -> String {
    let out = RE_COMMENT.replace_all(markup, "");
    let out = RE_DOCTYPE.replace_all(&out, "");
    let out = RE_XML_DECL.replace_all(&out, "");
    let out = RE_VERSION_ATTR.replace_all(&out, "");
    RE_XLINK_NS.replace_all(&out, "").into_owned()
}

fn compact_styles(markup: &str) -> Cow<'_, str> {
    RE_STYLE_ATTR.replace_all(markup, |caps: &Captures| {
        caps[0].replace(": ", ":").replace("; ", ";")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        let svg = "<svg>\n\t<g>\n    <path d=\"M0   0\"/>\n  </g>\n</svg>";
        assert_eq!(optimize_markup(svg), r#"<svg><g><path d="M0 0"/></g></svg>"#);
    }

    #[test]
    fn test_strips_prolog_and_comments() {
        let svg = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- Generator: Sketch -->
<svg><!-- inner --><rect/></svg>"#;
        assert_eq!(optimize_markup(svg), "<svg><rect/></svg>");
    }

    #[test]
    fn test_strips_version_and_xlink_namespace() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" xmlns:xlink="http://www.w3.org/1999/xlink" data-version="3"/>"#;
        assert_eq!(
            optimize_markup(svg),
            r#"<svg xmlns="http://www.w3.org/2000/svg" data-version="3"/>"#
        );
    }

    #[test]
    fn test_compacts_style_values_only() {
        let svg = r#"<svg><text style="fill: red; stroke: blue">a: b; c</text></svg>"#;
        assert_eq!(
            optimize_markup(svg),
            r#"<svg><text style="fill:red;stroke:blue">a: b; c</text></svg>"#
        );
    }

    #[test]
    fn test_comment_inside_text_leaves_single_space() {
        let svg = "<svg><text>a <!-- x --> b</text></svg>";
        assert_eq!(optimize_markup(svg), "<svg><text>a b</text></svg>");
    }

    #[test]
    fn test_spliced_comment_is_removed() {
        assert_eq!(optimize_markup("<svg><!-<!---->-->x</svg>"), "<svg>x</svg>");
    }

    #[test]
    fn test_style_compaction_splice() {
        let svg = r#"<svg style="<!-: -->"/>"#;
        let once = optimize_markup(svg);
        assert_eq!(optimize_markup(&once), once);
    }

    #[test]
    fn test_no_matches_is_unchanged() {
        assert_eq!(optimize_markup("<svg/>"), "<svg/>");
        assert_eq!(optimize_markup(""), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "<svg version=\"1.1\">\n  <g style=\"a: b;  c: d\"> <!-- c --> </g>\n</svg>",
            "<svg> x  <!-- a --> y </svg>",
            "<?xml version=\"1.0\"?>\n<svg/>",
        ];
        for input in inputs {
            let once = optimize_markup(input);
            assert_eq!(optimize_markup(&once), once, "input: {input}");
        }
    }
}
