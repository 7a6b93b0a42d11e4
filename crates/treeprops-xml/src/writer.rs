//! Element-at-a-time XML output.

use crate::{Error, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Writes an XML document one element at a time.
///
/// The writer keeps the stack of open elements, so callers only say *that*
/// an element ends, never which one. Text is escaped on output.
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
    open: Vec<String>,
    indented: bool,
}

impl<W: Write> XmlWriter<W> {
    /// A writer that emits everything on a single line.
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
            open: Vec::new(),
            indented: false,
        }
    }

    /// A writer that puts every element on its own line, indented by
    /// `indent` spaces per level.
    pub fn with_indent(inner: W, indent: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', indent),
            open: Vec::new(),
            indented: true,
        }
    }

    /// Write the `<?xml ...?>` declaration. Must come before any element.
    pub fn write_declaration(&mut self, encoding: &str) -> Result<()> {
        if !self.open.is_empty() {
            return Err(Error::InvalidStructure {
                message: "XML declaration after the first element".to_string(),
                span: None,
            });
        }
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some(encoding), None)))
            .map_err(Error::write)
    }

    pub fn start_element(&mut self, name: &str) -> Result<()> {
        if !is_valid_name(name) {
            return Err(Error::InvalidName {
                name: name.to_string(),
            });
        }
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(Error::write)?;
        self.open.push(name.to_string());
        Ok(())
    }

    /// Write escaped text inside the innermost open element.
    ///
    /// Empty text is still written as an event so that the enclosing element
    /// is closed on the same line (`<a></a>`) rather than around indentation.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        if self.open.is_empty() {
            return Err(Error::InvalidStructure {
                message: "text outside of the root element".to_string(),
                span: None,
            });
        }
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(Error::write)
    }

    /// Close the innermost open element.
    pub fn end_element(&mut self) -> Result<()> {
        let name = self.open.pop().ok_or_else(|| Error::InvalidStructure {
            message: "end of element without a matching start".to_string(),
            span: None,
        })?;
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(Error::write)
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Finish the document and hand back the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        if let Some(name) = self.open.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", name),
                span: None,
            });
        }
        if self.indented {
            self.writer.get_mut().write_all(b"\n").map_err(Error::write)?;
        }
        Ok(self.writer.into_inner())
    }
}

/// Whether `name` can be written as an element name and read back unchanged.
///
/// This is the XML `Name` production without `:`, since prefixes are
/// stripped when reading.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
