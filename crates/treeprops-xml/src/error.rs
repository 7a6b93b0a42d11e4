//! Error types for XML reading and writing.

use crate::Span;
use std::fmt;

/// Result type alias for treeprops-xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or writing XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// XML syntax error from quick-xml.
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// Unexpected end of input.
    UnexpectedEof {
        /// What was expected when EOF was encountered.
        expected: String,
        span: Option<Span>,
    },

    /// Mismatched end tag.
    MismatchedEndTag {
        expected: String,
        found: String,
        span: Option<Span>,
    },

    /// Invalid XML structure.
    InvalidStructure { message: String, span: Option<Span> },

    /// Empty document (no root element).
    EmptyDocument,

    /// Multiple root elements.
    MultipleRoots { span: Option<Span> },

    /// A name that cannot be used as an element name.
    InvalidName { name: String },

    /// The underlying sink rejected output.
    Write { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::XmlSyntax { message, position } => {
                write!(f, "XML syntax error: {}", message)?;
                if let Some(pos) = position {
                    write!(f, " at byte {}", pos)?;
                }
                Ok(())
            }
            Error::UnexpectedEof { expected, .. } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            Error::MismatchedEndTag {
                expected, found, ..
            } => {
                write!(
                    f,
                    "Mismatched end tag: expected </{}>, found </{}>",
                    expected, found
                )
            }
            Error::InvalidStructure { message, .. } => {
                write!(f, "Invalid XML structure: {}", message)
            }
            Error::EmptyDocument => {
                write!(f, "Empty XML document: no root element found")
            }
            Error::MultipleRoots { .. } => {
                write!(f, "Invalid XML: multiple root elements")
            }
            Error::InvalidName { name } => {
                write!(f, "'{}' is not a valid XML element name", name)
            }
            Error::Write { message } => write!(f, "Failed to write XML: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Byte range in the source text this error points at, if known.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::XmlSyntax { position, .. } => position.map(|pos| {
                let pos = pos as usize;
                Span::new(pos, pos + 1)
            }),
            Error::UnexpectedEof { span, .. }
            | Error::MismatchedEndTag { span, .. }
            | Error::InvalidStructure { span, .. }
            | Error::MultipleRoots { span } => *span,
            Error::EmptyDocument | Error::InvalidName { .. } | Error::Write { .. } => None,
        }
    }

    pub(crate) fn write(err: impl fmt::Display) -> Self {
        Error::Write {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}
