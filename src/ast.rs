//! SVG document tree
//!
//! The tree is owned: every element owns its children, nothing points back
//! up. A [`Document`] is created by one processing call and dropped when
//! that call returns.

/// A parsed SVG document, rooted at its `svg` element.
#[derive(Debug, Clone)]
pub struct Document {
    /// The root SVG element
    pub root: Element,
}

/// An SVG/XML element.
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name with optional prefix (e.g., "svg", "svg:rect")
    pub name: QName,
    /// Attributes in source order
    pub attributes: Vec<Attribute>,
    /// Child nodes
    pub children: Vec<Node>,
}

/// A qualified name (possibly with namespace prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace prefix (e.g., "xlink")
    pub prefix: Option<String>,
    /// Local name (e.g., "href")
    pub local: String,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Parse a qualified name from a string like "prefix:local" or just "local".
    pub fn parse(s: &str) -> Self {
        if let Some((prefix, local)) = s.split_once(':') {
            Self::with_prefix(prefix, local)
        } else {
            Self::new(s)
        }
    }

    /// True for an unprefixed name equal to `name`.
    pub fn is_plain(&self, name: &str) -> bool {
        self.prefix.is_none() && self.local == name
    }

    /// Get the full name as a string.
    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute on an element.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: QName::new(name),
            value: value.into(),
        }
    }
}

/// A node in the SVG tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// An element node
    Element(Element),
    /// A text node (unescaped)
    Text(String),
    /// A comment node
    Comment(String),
    /// A CDATA section
    CData(String),
    /// A processing instruction (e.g., `<?xml-stylesheet ... ?>`)
    ProcessingInstruction { target: String, content: Option<String> },
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: QName::new(name),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an unprefixed attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is_plain(name))
            .map(|a| a.value.as_str())
    }

    /// Set an unprefixed attribute, appending it if absent.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name.is_plain(&name)) {
            attr.value = value.into();
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Check if this element has a specific local name.
    pub fn is(&self, name: &str) -> bool {
        self.name.local == name
    }

    /// Iterate over child elements only (skip text, comments, etc.).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate over child elements mutably.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Remove the first child element named `name`, returning it.
    pub fn remove_first_child(&mut self, name: &str) -> Option<Element> {
        let index = self
            .children
            .iter()
            .position(|n| matches!(n, Node::Element(e) if e.is(name)))?;
        match self.children.remove(index) {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text_content(&self) -> String {
        fn collect(elem: &Element, out: &mut String) {
            for child in &elem.children {
                match child {
                    Node::Text(t) | Node::CData(t) => out.push_str(t),
                    Node::Element(e) => collect(e, out),
                    _ => {}
                }
            }
        }
        let mut out = String::new();
        collect(self, &mut out);
        out
    }

    /// Pre-order search for the first element (self included) named `name`.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.is(name) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(name))
    }
}

impl Document {
    /// Visit all elements mutably, parent before children.
    ///
    /// Stops at the first error.
    pub fn try_for_each_element_mut<E>(
        &mut self,
        mut f: impl FnMut(&mut Element) -> Result<(), E>,
    ) -> Result<(), E> {
        fn visit<E>(
            elem: &mut Element,
            f: &mut impl FnMut(&mut Element) -> Result<(), E>,
        ) -> Result<(), E> {
            f(elem)?;
            for child in elem.child_elements_mut() {
                visit(child, f)?;
            }
            Ok(())
        }
        visit(&mut self.root, &mut f)
    }

    /// Visit all elements mutably, parent before children.
    pub fn for_each_element_mut(&mut self, mut f: impl FnMut(&mut Element)) {
        let _ = self.try_for_each_element_mut::<std::convert::Infallible>(|e| {
            f(e);
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut root = Element::new("svg");
        let mut g = Element::new("g");
        g.children.push(Node::Text("hello ".into()));
        let mut title = Element::new("title");
        title.children.push(Node::Text("world".into()));
        g.children.push(Node::Element(title));
        root.children.push(Node::Element(Element::new("defs")));
        root.children.push(Node::Element(g));
        root.children.push(Node::Element(Element::new("defs")));
        root
    }

    #[test]
    fn test_attr_helpers_ignore_prefixed_names() {
        let mut elem = Element::new("use");
        elem.attributes.push(Attribute {
            name: QName::parse("xlink:href"),
            value: "#a".into(),
        });
        assert_eq!(elem.get_attr("href"), None);

        elem.set_attr("href", "#b");
        assert_eq!(elem.get_attr("href"), Some("#b"));
        assert_eq!(elem.attributes.len(), 2);
        assert_eq!(elem.attributes[0].name.full_name(), "xlink:href");
        assert_eq!(elem.attributes[0].value, "#a");
    }

    #[test]
    fn test_remove_first_child_only_removes_one() {
        let mut root = sample();
        assert!(root.remove_first_child("defs").is_some());
        assert_eq!(root.child_elements().filter(|e| e.is("defs")).count(), 1);
        assert!(root.remove_first_child("metadata").is_none());
    }

    #[test]
    fn test_text_content_and_find() {
        let root = sample();
        assert_eq!(root.find("g").map(|g| g.text_content()), Some("hello world".into()));
        assert_eq!(root.find("title").map(|t| t.text_content()), Some("world".into()));
        assert!(root.find("path").is_none());
    }

    #[test]
    fn test_traversal_is_pre_order() {
        let mut doc = Document { root: sample() };
        let mut names = Vec::new();
        doc.for_each_element_mut(|e| names.push(e.name.local.clone()));
        assert_eq!(names, ["svg", "defs", "g", "title", "defs"]);
    }
}
