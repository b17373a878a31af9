//! SVG parsing from XML.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::ast::*;
use crate::error::ParseError;

/// Deepest element nesting accepted, root included.
pub const MAX_DEPTH: usize = 256;

/// Parse an SVG string into a Document.
///
/// The document root is the first `svg` element in document order. Markup
/// whose top-level element is not `svg` is accepted when it contains one;
/// everything outside that element is dropped.
pub fn parse_svg(svg: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(svg);

    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                root = Some(parse_element(&mut reader, &start, 1)?);
                break;
            }
            Event::Empty(start) => {
                root = Some(parse_element_start(&start)?);
                break;
            }
            Event::Eof => break,
            // Prolog: declaration, doctype, comments, whitespace, PIs
            _ => {}
        }
    }

    let root = root
        .and_then(take_svg)
        .ok_or(ParseError::NoSvgElement)?;

    Ok(Document { root })
}

/// Take the first `svg` element (pre-order) out of `elem`.
fn take_svg(elem: Element) -> Option<Element> {
    if elem.is("svg") {
        return Some(elem);
    }
    elem.children.into_iter().find_map(|node| match node {
        Node::Element(e) => take_svg(e),
        _ => None,
    })
}

fn parse_element(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
    depth: usize,
) -> Result<Element, ParseError> {
    let mut element = parse_element_start(start)?;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if depth >= MAX_DEPTH {
                    return Err(ParseError::TooDeep(MAX_DEPTH));
                }
                element
                    .children
                    .push(Node::Element(parse_element(reader, &start, depth + 1)?));
            }
            Event::Empty(start) => {
                if depth >= MAX_DEPTH {
                    return Err(ParseError::TooDeep(MAX_DEPTH));
                }
                element
                    .children
                    .push(Node::Element(parse_element_start(&start)?));
            }
            Event::End(_) => {
                break;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                element.children.push(Node::Text(text.into_owned()));
            }
            Event::Comment(comment) => {
                element
                    .children
                    .push(Node::Comment(String::from_utf8_lossy(&comment).into_owned()));
            }
            Event::CData(cdata) => {
                element
                    .children
                    .push(Node::CData(String::from_utf8_lossy(&cdata).into_owned()));
            }
            Event::PI(pi) => {
                let content = String::from_utf8_lossy(&pi).into_owned();
                let (target, rest) = content
                    .split_once(char::is_whitespace)
                    .map(|(t, r)| (t.to_string(), Some(r.to_string())))
                    .unwrap_or_else(|| (content, None));
                element
                    .children
                    .push(Node::ProcessingInstruction { target, content: rest });
            }
            Event::Eof => {
                return Err(ParseError::UnexpectedEof);
            }
            _ => {}
        }
    }

    Ok(element)
}

fn parse_element_start(start: &BytesStart) -> Result<Element, ParseError> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;

    let mut element = Element {
        name: QName::parse(name),
        attributes: Vec::new(),
        children: Vec::new(),
    };

    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.attributes.push(Attribute {
            name: QName::parse(key),
            value: value.into_owned(),
        });
    }

    Ok(element)
}
