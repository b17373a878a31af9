//! Stage-ordered structural cleanup of a parsed document.

use log::debug;

use crate::ProcessingOptions;
use crate::ast::*;
use crate::color::normalize_paint;
use crate::error::SvgError;
use crate::viewbox::{ViewBox, format_dimension};

/// Run every enabled stage over `doc`, in a fixed order.
///
/// Later stages rely on earlier ones having run: comments go first, then
/// metadata and defs, then attribute pruning, color normalization and
/// finally the resize. A disabled stage leaves the tree untouched.
pub fn sanitize<'a>(
    doc: &'a mut Document,
    options: &ProcessingOptions,
) -> Result<&'a mut Document, SvgError> {
    if options.remove_comments {
        debug!("sanitize: removing comments");
        remove_comments(&mut doc.root);
    }

    if options.remove_metadata {
        debug!("sanitize: removing metadata");
        doc.root.remove_first_child("metadata");
    }

    if options.remove_defs {
        debug!("sanitize: removing defs");
        doc.root.remove_first_child("defs");
    }

    if options.remove_empty_attrs {
        debug!("sanitize: pruning empty attributes");
        doc.for_each_element_mut(|elem| elem.attributes.retain(|attr| !attr.value.is_empty()));
    }

    if options.convert_colors {
        debug!("sanitize: normalizing colors");
        doc.try_for_each_element_mut(normalize_colors)?;
    }

    if let Some(target) = options.target_size {
        debug!("sanitize: resizing to {target}");
        resize(&mut doc.root, target)?;
    }

    Ok(doc)
}

/// Remove comment nodes at every depth.
fn remove_comments(elem: &mut Element) {
    elem.children
        .retain(|node| !matches!(node, Node::Comment(_)));

    for child in elem.child_elements_mut() {
        remove_comments(child);
    }
}

fn normalize_colors(elem: &mut Element) -> Result<(), SvgError> {
    for attr in &mut elem.attributes {
        if attr.name.is_plain("fill") || attr.name.is_plain("stroke") {
            attr.value = normalize_paint(&attr.name.local, &attr.value)?;
        }
    }
    Ok(())
}

/// Set `width`/`height` so the larger viewBox side equals `target`.
fn resize(root: &mut Element, target: f64) -> Result<(), SvgError> {
    if !target.is_finite() || target <= 0.0 {
        return Err(SvgError::InvalidTargetSize(target));
    }

    let value = root.get_attr("viewBox").ok_or(SvgError::MissingViewBox)?;
    let view_box = ViewBox::parse(value).ok_or_else(|| SvgError::InvalidViewBox {
        value: value.to_string(),
    })?;

    let aspect = view_box.aspect();
    let (width, height) = if aspect >= 1.0 {
        (target, target / aspect)
    } else {
        (target * aspect, target)
    };

    root.set_attr("width", format_dimension(width));
    root.set_attr("height", format_dimension(height));
    Ok(())
}
