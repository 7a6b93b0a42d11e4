//! Options controlling how paths are built and documents are written.

use crate::path::DEFAULT_SEPARATOR;

/// Label of the element wrapping the whole store on save.
pub const DEFAULT_ROOT_LABEL: &str = "config";

/// Encoding declared in saved documents.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// How element names map to property paths, in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOptions {
    /// Character joining path segments.
    pub separator: char,

    /// Whether the document root's name is the first path segment.
    pub include_root: bool,

    /// Deepest element nesting written on save.
    pub max_depth: usize,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            include_root: false,
            max_depth: 256,
        }
    }
}

/// Options for serializing a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Name of the element enclosing all properties.
    pub root_label: String,

    /// Encoding named in the XML declaration. Only UTF-8 is written.
    pub encoding: String,

    /// Spaces per nesting level, or `None` for single-line output.
    pub indent: Option<usize>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            indent: Some(2),
        }
    }
}

impl SaveOptions {
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }

    /// Whether the configured encoding is one this crate can produce.
    pub fn is_supported_encoding(&self) -> bool {
        matches!(
            self.encoding.to_ascii_lowercase().as_str(),
            "utf-8" | "utf8"
        )
    }
}
