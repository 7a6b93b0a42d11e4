//! XML element trees and element writing for treeprops.
//!
//! This crate wraps [`quick-xml`] in the two directions the property store
//! needs:
//!
//! - [`parse`] reads a document into an [`XmlDocument`], a tree of
//!   [`XmlElement`]s where every element remembers the byte [`Span`] it was
//!   parsed from.
//! - [`XmlWriter`] emits a document element by element: start an element,
//!   write escaped text, end the element.
//!
//! # Example
//!
//! ```rust
//! use treeprops_xml::{parse, XmlWriter};
//!
//! let doc = parse("<config><server><port>8080</port></server></config>").unwrap();
//! let server = doc.root.get_children("server")[0];
//! assert_eq!(server.get_children("port")[0].text(), Some("8080"));
//!
//! let mut writer = XmlWriter::new(Vec::new());
//! writer.start_element("port").unwrap();
//! writer.write_text("8080").unwrap();
//! writer.end_element().unwrap();
//! assert_eq!(writer.finish().unwrap(), b"<port>8080</port>");
//! ```
//!
//! # Locations
//!
//! Spans are byte offsets into the parsed text. [`XmlDocument::location`]
//! turns an offset into a row/column pair for error messages.

pub mod error;
pub mod location;
pub mod parser;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
pub use location::{LineIndex, Location};
pub use parser::parse;
pub use types::{Span, XmlAttribute, XmlChild, XmlChildren, XmlDocument, XmlElement};
pub use writer::{XmlWriter, is_valid_name};
