//! svgrab - grab, sanitize and re-encode SVG markup
//!
//! svgrab takes raw SVG markup found in a document, cleans it with a fixed
//! set of structural and textual transforms, and emits it as cleaned markup,
//! size statistics, or UI-component source.

mod ast;
mod color;
mod component;
mod config;
mod error;
mod naming;
mod optimize;
mod parse;
mod process;
mod queue;
mod sanitize;
mod serialize;
mod stats;
mod viewbox;

pub use ast::*;
pub use color::*;
pub use component::*;
pub use config::*;
pub use error::*;
pub use naming::*;
pub use optimize::*;
pub use parse::*;
pub use process::*;
pub use queue::*;
pub use sanitize::*;
pub use serialize::*;
pub use stats::*;
pub use viewbox::*;

use serde::{Deserialize, Serialize};

/// Which pipeline stages a [`process`] call runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProcessingOptions {
    /// Run the markup optimizer over the serialized result
    pub optimize: bool,
    /// Remove comment nodes
    pub remove_comments: bool,
    /// Remove the first `<defs>` child of the root
    pub remove_defs: bool,
    /// Remove the first `<metadata>` child of the root
    pub remove_metadata: bool,
    /// Remove attributes whose value is empty
    pub remove_empty_attrs: bool,
    /// Rewrite `fill`/`stroke` colors to canonical form
    pub convert_colors: bool,
    /// Resize so the larger dimension equals this value
    pub target_size: Option<f64>,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            remove_comments: true,
            remove_defs: false,
            remove_metadata: true,
            remove_empty_attrs: false,
            convert_colors: false,
            target_size: None,
        }
    }
}
