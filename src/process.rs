//! One-shot processing of a single SVG: parse, sanitize, optimize, measure.

use log::{debug, warn};
use serde::{Serialize, Serializer};

use crate::ProcessingOptions;
use crate::error::SvgError;
use crate::optimize::optimize_markup;
use crate::parse::parse_svg;
use crate::sanitize::sanitize;
use crate::serialize::serialize;
use crate::stats::{Stats, stats};

/// Outcome of [`process`].
///
/// A failure always carries the untouched input; a success carries stats
/// computed from its final `svg`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ProcessingResult {
    Success { svg: String, stats: Stats },
    #[serde(rename_all = "camelCase")]
    Failure {
        #[serde(serialize_with = "serialize_display")]
        error: SvgError,
        original_svg: String,
    },
}

impl ProcessingResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The processed markup, if processing succeeded.
    pub fn svg(&self) -> Option<&str> {
        match self {
            Self::Success { svg, .. } => Some(svg),
            Self::Failure { .. } => None,
        }
    }

    pub fn stats(&self) -> Option<&Stats> {
        match self {
            Self::Success { stats, .. } => Some(stats),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&SvgError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

fn serialize_display<S: Serializer>(error: &SvgError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Process one raw SVG string.
///
/// Never fails: every fault raised by parsing or a sanitization stage comes
/// back as [`ProcessingResult::Failure`] together with `raw_svg`.
pub fn process(raw_svg: &str, options: &ProcessingOptions) -> ProcessingResult {
    match try_process(raw_svg, options) {
        Ok((svg, stats)) => {
            debug!(
                "processed svg: {} -> {} bytes",
                raw_svg.len(),
                stats.original_size
            );
            ProcessingResult::Success { svg, stats }
        }
        Err(error) => {
            warn!("failed to process svg: {error}");
            ProcessingResult::Failure {
                error,
                original_svg: raw_svg.to_string(),
            }
        }
    }
}

fn try_process(raw_svg: &str, options: &ProcessingOptions) -> Result<(String, Stats), SvgError> {
    let mut doc = parse_svg(raw_svg)?;
    sanitize(&mut doc, options)?;

    let markup = serialize(&doc);
    let svg = if options.optimize {
        optimize_markup(&markup)
    } else {
        markup
    };

    let stats = stats(&svg);
    Ok((svg, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_defaults() {
        let raw = "<svg viewBox=\"0 0 10 10\">\n  <!-- c -->\n  <metadata>m</metadata>\n  <path d=\"M0 0\"/>\n</svg>";
        let result = process(raw, &ProcessingOptions::default());
        assert_eq!(result.svg(), Some(r#"<svg viewBox="0 0 10 10"><path d="M0 0"/></svg>"#));
        let stats = result.stats().unwrap();
        assert_eq!(stats.original_size, stats.optimized_size);
        assert_eq!(stats.paths, 1);
    }

    #[test]
    fn test_invalid_svg_keeps_original() {
        let raw = "<div>nope</div>";
        let result = process(raw, &ProcessingOptions::default());
        match result {
            ProcessingResult::Failure {
                error,
                original_svg,
            } => {
                assert_eq!(error.to_string(), "Invalid SVG");
                assert_eq!(original_svg, raw);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_stage_fault_becomes_failure() {
        let options = ProcessingOptions {
            target_size: Some(32.0),
            ..ProcessingOptions::default()
        };
        let result = process("<svg><path/></svg>", &options);
        assert!(matches!(result.error(), Some(SvgError::MissingViewBox)));
    }

    #[test]
    fn test_unoptimized_output_keeps_layout() {
        let options = ProcessingOptions {
            optimize: false,
            ..ProcessingOptions::default()
        };
        let raw = "<svg>\n  <path d=\"M0 0\"/>\n</svg>";
        let result = process(raw, &options);
        assert_eq!(result.svg(), Some(raw));
        // stats still measure what the optimizer would save
        let stats = result.stats().unwrap();
        assert!(stats.optimized_size < stats.original_size);
    }

    #[test]
    fn test_result_json_shape() {
        let ok = serde_json::to_value(process("<svg/>", &ProcessingOptions::default())).unwrap();
        assert_eq!(ok["status"], "success");
        assert_eq!(ok["svg"], "<svg/>");
        assert_eq!(ok["stats"]["originalSize"], 6);

        let err = serde_json::to_value(process("x", &ProcessingOptions::default())).unwrap();
        assert_eq!(err["status"], "failure");
        assert_eq!(err["error"], "Invalid SVG");
        assert_eq!(err["originalSvg"], "x");
    }
}
