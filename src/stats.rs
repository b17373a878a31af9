//! Size and structure statistics for processed markup.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::optimize::optimize_markup;

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?[a-z][^>]*>").unwrap());
static RE_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<path").unwrap());
static RE_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<g").unwrap());

/// Sizes are UTF-8 byte lengths.
///
/// The counts are textual approximations, not a tree count: `elements`
/// counts every opening, closing and self-closing tag, `paths` every `<path`
/// and `groups` every `<g` (which also matches e.g. `<glyph`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub original_size: usize,
    pub optimized_size: usize,
    pub elements: usize,
    pub paths: usize,
    pub groups: usize,
}

impl Stats {
    /// Percentage of bytes the optimizer saves (0 for empty input).
    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let saved = self.original_size.saturating_sub(self.optimized_size);
        (saved as f64 / self.original_size as f64) * 100.0
    }
}

/// Compute statistics for `markup`.
///
/// `optimized_size` always comes from running the optimizer on `markup`,
/// whether or not it was already optimized.
pub fn stats(markup: &str) -> Stats {
    Stats {
        original_size: markup.len(),
        optimized_size: optimize_markup(markup).len(),
        elements: RE_TAG.find_iter(markup).count(),
        paths: RE_PATH.find_iter(markup).count(),
        groups: RE_GROUP.find_iter(markup).count(),
    }
}
