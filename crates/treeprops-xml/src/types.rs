//! Core types for position-tracked XML trees.

use crate::location::{LineIndex, Location};
use std::ops::Range;

/// A byte range in the parsed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A parsed XML document.
///
/// Holds the root element and a line index over the text it was parsed from,
/// so spans can be turned into line numbers after the text is gone.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    /// The root element of the document.
    pub root: XmlElement,

    lines: LineIndex,
}

/// An XML element.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// The local name of the element (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any (e.g., "cfg" in `<cfg:port>`).
    pub prefix: Option<String>,

    /// Attributes of this element.
    pub attributes: Vec<XmlAttribute>,

    /// Child content of this element.
    pub children: XmlChildren,

    /// Span of the element name inside the start tag.
    pub name_span: Span,

    /// Span of the entire element, from the start tag to the end tag.
    pub span: Span,
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// The local name of the attribute (without namespace prefix).
    pub name: String,

    pub prefix: Option<String>,

    /// The attribute value (after unescaping XML entities).
    pub value: String,
}

/// Children of an XML element.
#[derive(Debug, Clone)]
pub enum XmlChildren {
    /// Element contains only child elements.
    Elements(Vec<XmlElement>),

    /// Element contains exactly one run of text.
    Text { content: String, span: Span },

    /// Element contains several runs of text, or text and elements.
    Mixed(Vec<XmlChild>),

    /// Element is empty (no content).
    Empty,
}

/// A single child in mixed content.
#[derive(Debug, Clone)]
pub enum XmlChild {
    Element(XmlElement),
    Text { content: String, span: Span },
}

impl XmlDocument {
    pub fn new(root: XmlElement, lines: LineIndex) -> Self {
        Self { root, lines }
    }

    /// Row/column of a byte offset in the parsed text.
    pub fn location(&self, offset: usize) -> Option<Location> {
        self.lines.location(offset)
    }

    /// 1-based line number of a byte offset, `0` if out of range.
    pub fn line_of(&self, offset: usize) -> usize {
        self.location(offset).map_or(0, |loc| loc.line())
    }
}

impl XmlElement {
    /// Create a new empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            attributes: Vec::new(),
            children: XmlChildren::Empty,
            name_span: Span::default(),
            span: Span::default(),
        }
    }

    /// Create an element with child elements.
    pub fn with_elements(name: impl Into<String>, children: Vec<XmlElement>) -> Self {
        Self {
            children: XmlChildren::Elements(children),
            ..Self::new(name)
        }
    }

    /// Create an element with text content.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            children: XmlChildren::Text {
                content: text.into(),
                span: Span::default(),
            },
            ..Self::new(name)
        }
    }

    /// Get an attribute value by name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if this element has child elements.
    pub fn has_elements(&self) -> bool {
        match &self.children {
            XmlChildren::Elements(elements) => !elements.is_empty(),
            XmlChildren::Mixed(children) => children
                .iter()
                .any(|c| matches!(c, XmlChild::Element(_))),
            XmlChildren::Text { .. } | XmlChildren::Empty => false,
        }
    }

    /// An element without child elements. Text content does not count.
    pub fn is_leaf(&self) -> bool {
        !self.has_elements()
    }

    /// Check if this element has a single run of text content.
    pub fn has_text(&self) -> bool {
        matches!(&self.children, XmlChildren::Text { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self.children, XmlChildren::Empty)
    }

    /// Get child elements, if this element contains only elements.
    pub fn elements(&self) -> Option<&[XmlElement]> {
        match &self.children {
            XmlChildren::Elements(elements) => Some(elements),
            _ => None,
        }
    }

    /// Get text content, if this element contains a single run of text.
    pub fn text(&self) -> Option<&str> {
        match &self.children {
            XmlChildren::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// All direct text of this element concatenated, ignoring child elements.
    pub fn text_content(&self) -> String {
        match &self.children {
            XmlChildren::Text { content, .. } => content.clone(),
            XmlChildren::Mixed(children) => children
                .iter()
                .filter_map(|c| match c {
                    XmlChild::Text { content, .. } => Some(content.as_str()),
                    XmlChild::Element(_) => None,
                })
                .collect(),
            XmlChildren::Elements(_) | XmlChildren::Empty => String::new(),
        }
    }

    /// Get child elements by name.
    pub fn get_children(&self, name: &str) -> Vec<&XmlElement> {
        self.all_children()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    /// Get all child elements (ignoring text in mixed content).
    pub fn all_children(&self) -> Vec<&XmlElement> {
        match &self.children {
            XmlChildren::Elements(elements) => elements.iter().collect(),
            XmlChildren::Mixed(children) => children
                .iter()
                .filter_map(|c| match c {
                    XmlChild::Element(e) => Some(e),
                    XmlChild::Text { .. } => None,
                })
                .collect(),
            XmlChildren::Text { .. } | XmlChildren::Empty => vec![],
        }
    }
}
