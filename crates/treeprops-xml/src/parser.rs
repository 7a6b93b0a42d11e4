//! XML parser that builds XmlDocument trees.

use crate::{
    Error, LineIndex, Result, Span, XmlAttribute, XmlChild, XmlChildren, XmlDocument, XmlElement,
};
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// Parse XML from a string, producing an [`XmlDocument`].
///
/// Comments, processing instructions, the XML declaration and DOCTYPE are
/// skipped. Namespace prefixes are split off element and attribute names.
///
/// # Example
///
/// ```rust
/// use treeprops_xml::parse;
///
/// let doc = parse("<root><child/></root>").unwrap();
/// assert_eq!(doc.root.name, "root");
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed, has no root element, or has
/// more than one.
pub fn parse(content: &str) -> Result<XmlDocument> {
    let mut parser = XmlParser::new(content);
    let root = parser.parse()?;
    Ok(XmlDocument::new(root, LineIndex::new(content)))
}

/// Internal parser state.
struct XmlParser<'a> {
    reader: Reader<&'a [u8]>,

    /// Stack of elements being built.
    stack: Vec<BuildNode>,
}

/// A node being constructed during parsing.
struct BuildNode {
    name: String,
    name_span: Span,
    prefix: Option<String>,
    attributes: Vec<XmlAttribute>,

    /// Byte offset where this element started (the `<` character).
    start_offset: usize,

    /// Child elements and text accumulated so far.
    children: Vec<XmlChild>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<XmlElement> {
        let mut root: Option<XmlElement> = None;

        loop {
            // Capture position before reading the event
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    self.handle_start(&e, event_start)?;
                }
                Ok(Event::End(e)) => {
                    let element = self.handle_end(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = self.handle_empty(&e, event_start)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(&e, event_start)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(&e, event_start)?;
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", node.name),
                span: Some(node.name_span),
            });
        }

        root.ok_or(Error::EmptyDocument)
    }

    /// Add a finished element to its parent, or make it the root.
    fn attach(&mut self, element: XmlElement, root: &mut Option<XmlElement>) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(XmlChild::Element(element));
                Ok(())
            }
            None if root.is_some() => Err(Error::MultipleRoots {
                span: Some(element.span),
            }),
            None => {
                *root = Some(element);
                Ok(())
            }
        }
    }

    fn handle_start(&mut self, e: &BytesStart<'_>, event_start: usize) -> Result<()> {
        let (name, prefix) = split_name(e.name().as_ref());
        let name_span = name_span(e, event_start);
        let attributes = parse_attributes(e, event_start)?;

        self.stack.push(BuildNode {
            name,
            name_span,
            prefix,
            attributes,
            start_offset: event_start,
            children: Vec::new(),
        });

        Ok(())
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) -> Result<XmlElement> {
        let (end_name, _) = split_name(e.name().as_ref());

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
            span: None,
        })?;

        if node.name != end_name {
            return Err(Error::MismatchedEndTag {
                expected: node.name,
                found: end_name,
                span: Some(node.name_span),
            });
        }

        let end_offset = self.reader.buffer_position() as usize;

        Ok(XmlElement {
            name: node.name,
            prefix: node.prefix,
            attributes: node.attributes,
            children: finalize_children(node.children),
            name_span: node.name_span,
            span: Span::new(node.start_offset, end_offset),
        })
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>, event_start: usize) -> Result<XmlElement> {
        let (name, prefix) = split_name(e.name().as_ref());
        let attributes = parse_attributes(e, event_start)?;
        let end_offset = self.reader.buffer_position() as usize;

        Ok(XmlElement {
            name,
            prefix,
            attributes,
            children: XmlChildren::Empty,
            name_span: name_span(e, event_start),
            span: Span::new(event_start, end_offset),
        })
    }

    fn handle_text(&mut self, e: &BytesText<'_>, event_start: usize) -> Result<()> {
        let text = e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid text content: {}", err),
            position: Some(event_start as u64),
        })?;
        let span = Span::new(event_start, self.reader.buffer_position() as usize);

        self.push_text(text.into_owned(), span)
    }

    fn handle_cdata(&mut self, e: &BytesCData<'_>, event_start: usize) -> Result<()> {
        let content = String::from_utf8_lossy(e.as_ref()).into_owned();
        let span = Span::new(event_start, self.reader.buffer_position() as usize);
        self.push_text(content, span)
    }

    /// Append a text run to the open element. Outside the root only
    /// whitespace (and a byte order mark) is allowed.
    fn push_text(&mut self, content: String, span: Span) -> Result<()> {
        match self.stack.last_mut() {
            Some(node) => {
                node.children.push(XmlChild::Text { content, span });
                Ok(())
            }
            None if content.trim_start_matches('\u{feff}').trim().is_empty() => Ok(()),
            None => Err(Error::InvalidStructure {
                message: "Text outside the root element".to_string(),
                span: Some(span),
            }),
        }
    }
}

/// Split `prefix:local` into the local name and optional prefix.
fn split_name(raw: &[u8]) -> (String, Option<String>) {
    let full_name = String::from_utf8_lossy(raw);

    match full_name.split_once(':') {
        Some((prefix, local)) => (local.to_string(), Some(prefix.to_string())),
        None => (full_name.into_owned(), None),
    }
}

fn name_span(e: &BytesStart<'_>, event_start: usize) -> Span {
    let name_start = event_start + 1; // Skip '<'
    Span::new(name_start, name_start + e.name().as_ref().len())
}

fn parse_attributes(e: &BytesStart<'_>, tag_start: usize) -> Result<Vec<XmlAttribute>> {
    let mut attributes = Vec::new();

    for attr_result in e.attributes() {
        let attr = attr_result?;
        let (name, prefix) = split_name(attr.key.as_ref());

        let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid attribute value: {}", err),
            position: Some(tag_start as u64),
        })?;

        attributes.push(XmlAttribute {
            name,
            prefix,
            value: value.into_owned(),
        });
    }

    Ok(attributes)
}

/// Classify accumulated children.
///
/// Next to child elements, whitespace-only text is indentation and is
/// dropped. Without child elements every text run is kept and the runs are
/// joined, so comments inside a value do not split it.
fn finalize_children(children: Vec<XmlChild>) -> XmlChildren {
    let has_elements = children.iter().any(|c| matches!(c, XmlChild::Element(_)));

    if has_elements {
        let children: Vec<XmlChild> = children
            .into_iter()
            .filter(|c| match c {
                XmlChild::Text { content, .. } => !content.trim().is_empty(),
                XmlChild::Element(_) => true,
            })
            .collect();

        if children.iter().all(|c| matches!(c, XmlChild::Element(_))) {
            let elements = children
                .into_iter()
                .filter_map(|c| match c {
                    XmlChild::Element(e) => Some(e),
                    XmlChild::Text { .. } => None,
                })
                .collect();
            return XmlChildren::Elements(elements);
        }
        return XmlChildren::Mixed(children);
    }

    let mut runs = children.into_iter().filter_map(|c| match c {
        XmlChild::Text { content, span } => Some((content, span)),
        XmlChild::Element(_) => None,
    });
    let Some((mut content, mut span)) = runs.next() else {
        return XmlChildren::Empty;
    };
    for (more, more_span) in runs {
        content.push_str(&more);
        span.end = more_span.end;
    }
    XmlChildren::Text { content, span }
}
