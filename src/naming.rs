//! File names and data URLs for saving or previewing processed SVGs.
//!
//! # File names
//!
//! An inline SVG is named after, in order of preference:
//!
//! 1. the text of its first `<title>`,
//! 2. the `id` of its root element,
//! 3. its position in the page (`icon-1`, `icon-2`, ...).
//!
//! The chosen name is lowercased and reduced to `[a-z0-9-]`, and always
//! ends in `.svg`. An SVG fetched from a URL keeps the URL's file name.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::parse::parse_svg;

/// Prefix of index-based fallback file names.
pub const DEFAULT_FILE_PREFIX: &str = "icon";

/// File name for the `index`-th inline SVG on a page.
pub fn file_name_for(markup: &str, index: usize) -> String {
    file_name_with_prefix(markup, index, DEFAULT_FILE_PREFIX)
}

/// Like [`file_name_for`], with a custom fallback prefix.
pub fn file_name_with_prefix(markup: &str, index: usize, fallback_prefix: &str) -> String {
    let fallback = || format!("{}-{}", fallback_prefix, index + 1);

    let candidate = parse_svg(markup).ok().and_then(|doc| {
        doc.root
            .find("title")
            .map(|title| title.text_content())
            .or_else(|| doc.root.get_attr("id").map(str::to_string))
    });

    let stem = candidate
        .map(|name| sanitize_file_name(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| sanitize_file_name(&fallback()));

    with_svg_extension(stem)
}

/// File name of an externally referenced SVG: the last path segment of
/// `url`, without query string or fragment.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    (!name.is_empty()).then(|| name.to_string())
}

/// Lowercase, map every char outside `[a-z0-9-]` to `-`, collapse hyphen
/// runs and trim hyphens from both ends.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_string()
}

fn with_svg_extension(mut name: String) -> String {
    if !name.ends_with(".svg") {
        name.push_str(".svg");
    }
    name
}

/// `data:` URL embedding `markup`, for previews.
pub fn data_url(markup: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        BASE64_STANDARD.encode(markup.as_bytes())
    )
}
