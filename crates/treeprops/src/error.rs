//! Errors raised while loading, reading, and saving property stores.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use treeprops_xml::Span;

/// Result type alias for treeprops operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The source file could not be read.
    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source is not well-formed XML.
    #[error("failed to parse document: {0}")]
    Parse(#[source] treeprops_xml::Error),

    /// The document parsed but has no leaf elements.
    #[error("configuration is empty: the document has no leaf elements")]
    EmptyDocument,

    /// Two leaves flatten to the same path.
    #[error("property '{path}' has multiple entries (while it must have unique entries)")]
    DuplicatePath {
        path: String,
        /// The leaf that collided.
        span: Option<Span>,
        /// The leaf that first claimed the path.
        first_span: Option<Span>,
    },

    #[error("property '{key}' does not exist")]
    MissingKey { key: String },

    #[error("value '{value}' for property '{key}' cannot be converted to {target}")]
    Conversion {
        key: String,
        value: String,
        target: &'static str,
    },

    /// A path segment that cannot become an element name.
    #[error("property '{path}' contains segment '{segment}', which is not a valid element name")]
    InvalidSegment { path: String, segment: String },

    /// Two keys differ only by the optional leading separator.
    #[error("properties '{first}' and '{second}' name the same element")]
    ConflictingPaths { first: String, second: String },

    /// With the root name in every path, the keys must share one first
    /// segment that holds no value of its own.
    #[error(
        "properties map to {} root elements ({}), but a document has exactly one",
        .segments.len(),
        .segments.join(", ")
    )]
    MultipleRootSegments { segments: Vec<String> },

    #[error("property nesting too deep (max depth: {max_depth}) at '{path}'")]
    NestingTooDeep { max_depth: usize, path: String },

    #[error("unsupported encoding '{0}': only UTF-8 output is supported")]
    UnsupportedEncoding(String),

    /// The element writer rejected output.
    #[error("failed to write document: {0}")]
    Emit(#[source] treeprops_xml::Error),

    /// The destination could not be written.
    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Byte range in the loaded text this error points at, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Parse(err) => err.span(),
            Error::DuplicatePath { span, .. } => *span,
            _ => None,
        }
    }

    /// Whether this error came out of a load rather than an access or a save.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::Read { .. } | Error::Parse(_) | Error::EmptyDocument | Error::DuplicatePath { .. }
        )
    }
}
