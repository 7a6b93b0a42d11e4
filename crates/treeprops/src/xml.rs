//! Glue between the codec traits and `treeprops-xml`.

use crate::extract::TreeNode;
use crate::write::ElementWriter;
use crate::{Error, Result};
use std::io::Write;
use treeprops_xml::{Span, XmlElement, XmlWriter};

/// A borrowed element of a parsed XML document.
#[derive(Debug, Clone, Copy)]
pub struct XmlNode<'a> {
    element: &'a XmlElement,
}

impl<'a> XmlNode<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }
}

impl TreeNode for XmlNode<'_> {
    fn name(&self) -> &str {
        &self.element.name
    }

    fn children(&self) -> Vec<Self> {
        self.element
            .all_children()
            .into_iter()
            .map(XmlNode::new)
            .collect()
    }

    fn text(&self) -> String {
        if !self.element.attributes.is_empty() {
            tracing::debug!(
                element = %self.element.name,
                count = self.element.attributes.len(),
                "Ignoring attributes"
            );
        }
        self.element.text_content()
    }

    fn span(&self) -> Option<Span> {
        Some(self.element.span)
    }
}

impl<W: Write> ElementWriter for XmlWriter<W> {
    fn start_element(&mut self, name: &str) -> Result<()> {
        XmlWriter::start_element(self, name).map_err(Error::Emit)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        XmlWriter::write_text(self, text).map_err(Error::Emit)
    }

    fn end_element(&mut self) -> Result<()> {
        XmlWriter::end_element(self).map_err(Error::Emit)
    }
}
