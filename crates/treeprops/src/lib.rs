//! Flat, path-keyed property stores backed by hierarchical XML.
//!
//! A configuration document like
//!
//! ```xml
//! <config>
//!   <server>
//!     <host>localhost</host>
//!     <port>8080</port>
//!   </server>
//! </config>
//! ```
//!
//! loads into a [`PropertyStore`] holding two entries, `/server/host` and
//! `/server/port`. Saving the store regroups the paths by their shared
//! prefixes and writes the nested document again.
//!
//! # Architecture
//!
//! - [`path`]: building paths from ancestor chains and grouping flat maps by
//!   their leading segment
//! - [`extract`](mod@extract): flattening any [`TreeNode`] tree into a
//!   [`PropertyMap`]
//! - [`write`]: writing a [`PropertyMap`] through any [`ElementWriter`]
//! - [`store`]: the [`PropertyStore`] facade tying these to `treeprops-xml`
//!
//! # Example
//!
//! ```rust
//! use treeprops::{PropertyStore, SaveOptions};
//!
//! let mut store = PropertyStore::from_xml_str(
//!     "<config><server><port>8080</port></server></config>",
//! ).unwrap();
//! store.set("/server/host", "localhost");
//!
//! let xml = store.to_xml_string(&SaveOptions::default()).unwrap();
//! let reloaded = PropertyStore::from_xml_str(&xml).unwrap();
//! assert_eq!(reloaded.get("/server/host").unwrap(), "localhost");
//! ```

pub mod convert;
pub mod error;
pub mod extract;
pub mod options;
pub mod path;
pub mod store;
pub mod write;
pub mod xml;

use std::collections::BTreeMap;

/// Path to value mapping, ordered by path.
pub type PropertyMap = BTreeMap<String, String>;

pub use convert::FromPropertyValue;
pub use error::{Error, Result};
pub use extract::{TreeNode, extract};
pub use options::{DEFAULT_ENCODING, DEFAULT_ROOT_LABEL, PathOptions, SaveOptions};
pub use path::{Bucket, DEFAULT_SEPARATOR, full_path, group_by_first_segment, split_first_segment};
pub use store::PropertyStore;
pub use write::{ElementWriter, write_tree};
pub use xml::XmlNode;
