//! SVG serialization back to markup.

use crate::ast::*;

/// Serialize the document's root element to markup.
///
/// Output is the outer markup of the root `svg` element: attributes in
/// source order, text kept verbatim, childless elements self-closed. No XML
/// declaration or DOCTYPE is written.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    serialize_element(&mut out, &doc.root);
    out
}

fn serialize_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.name.full_name());

    for attr in &elem.attributes {
        out.push(' ');
        out.push_str(&attr.name.full_name());
        out.push_str("=\"");
        push_escaped_attr(out, &attr.value);
        out.push('"');
    }

    // Children or self-closing
    if elem.children.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');

        for child in &elem.children {
            serialize_node(out, child);
        }

        out.push_str("</");
        out.push_str(&elem.name.full_name());
        out.push('>');
    }
}

fn serialize_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => serialize_element(out, elem),
        Node::Text(text) => push_escaped_text(out, text),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        Node::ProcessingInstruction { target, content } => {
            out.push_str("<?");
            out.push_str(target);
            if let Some(c) = content {
                out.push(' ');
                out.push_str(c);
            }
            out.push_str("?>");
        }
    }
}

fn push_escaped_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
