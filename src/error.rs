use std::path::PathBuf;

use thiserror::Error;

/// Every fault a processing call can produce.
///
/// `process` converts these into `ProcessingResult::Failure`; none of them
/// escapes that boundary.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("Invalid SVG")]
    Parse(#[from] ParseError),

    #[error("Cannot resize: root svg element has no viewBox")]
    MissingViewBox,

    #[error("Cannot resize: invalid viewBox \"{value}\"")]
    InvalidViewBox { value: String },

    #[error("Invalid target size: {0}")]
    InvalidTargetSize(f64),

    #[error("Unrecognized color value for {attribute}: \"{value}\"")]
    ColorResolution { attribute: String, value: String },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("{0}")]
    Unknown(String),
}

/// Why markup could not be turned into a [`Document`](crate::Document).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("No svg element found")]
    NoSvgElement,

    #[error("Elements nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("Unexpected end of file")]
    UnexpectedEof,

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
