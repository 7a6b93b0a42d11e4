//! The property store facade.

use crate::convert::FromPropertyValue;
use crate::extract::extract;
use crate::path::group_by_first_segment;
use crate::write::write_tree;
use crate::xml::XmlNode;
use crate::{Error, PathOptions, PropertyMap, Result, SaveOptions};
use std::fmt;
use std::path::{Path, PathBuf};
use treeprops_xml::XmlWriter;

/// A flat mapping from element paths to string values.
///
/// Loading flattens an XML document into the store; saving writes the store
/// back as nested elements. Nesting exists only in the document: in memory
/// every property is a single `path -> value` entry, kept in path order.
///
/// ```
/// use treeprops::PropertyStore;
///
/// let store = PropertyStore::from_xml_str(
///     "<config><server><port>8080</port></server></config>",
/// ).unwrap();
///
/// assert_eq!(store.get("/server/port").unwrap(), "8080");
/// assert_eq!(store.get_as::<u16>("/server/port", 80), 8080);
/// assert_eq!(store.get_or("/server/host", "localhost"), "localhost");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStore {
    properties: PropertyMap,
    options: PathOptions,
}

impl PropertyStore {
    /// An empty store with default path options.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store using `options` for every later load and save.
    pub fn with_options(options: PathOptions) -> Self {
        Self {
            properties: PropertyMap::new(),
            options,
        }
    }

    /// Load a store from an XML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    /// Load a store from XML text.
    pub fn from_xml_str(content: &str) -> Result<Self> {
        let mut store = Self::new();
        store.load_str(content)?;
        Ok(store)
    }

    pub fn options(&self) -> &PathOptions {
        &self.options
    }

    /// Replace the store's contents with the properties of an XML file.
    ///
    /// On any error the store keeps its previous contents.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_str(&content)?;
        tracing::info!(path = %path.display(), count = self.properties.len(), "Loaded configuration");
        Ok(())
    }

    /// Replace the store's contents with the properties of XML text.
    ///
    /// On any error the store keeps its previous contents.
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let document = treeprops_xml::parse(content).map_err(Error::Parse)?;
        self.properties = extract(XmlNode::new(&document.root), &self.options)?;
        Ok(())
    }

    /// Value of `key`, or [`Error::MissingKey`].
    pub fn get(&self, key: &str) -> Result<&str> {
        self.get_opt(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })
    }

    /// Value of `key`, if present.
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Value of `key`, or `default` if it is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_opt(key).unwrap_or(default)
    }

    /// Value of `key` converted to `T`.
    ///
    /// A missing key or a value that does not convert yields `default`. The
    /// failure is only logged; use [`try_get_as`](Self::try_get_as) to see it.
    pub fn get_as<T: FromPropertyValue>(&self, key: &str, default: T) -> T {
        match self.try_get_as(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(key, error = %err, "Using default value");
                default
            }
        }
    }

    /// Value of `key` converted to `T`, failing with [`Error::MissingKey`] or
    /// [`Error::Conversion`].
    pub fn try_get_as<T: FromPropertyValue>(&self, key: &str) -> Result<T> {
        let value = self.get(key)?;
        T::from_property_value(value).ok_or_else(|| Error::Conversion {
            key: key.to_string(),
            value: value.to_string(),
            target: T::TYPE_NAME,
        })
    }

    /// Insert or overwrite a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// All properties, in path order.
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn into_properties(self) -> PropertyMap {
        self.properties
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize the store into `out`.
    ///
    /// The properties are wrapped in one `root_label` element, unless the
    /// store keeps the root name in its paths. Then the first segment is the
    /// root element, `root_label` is not used, and every key must start with
    /// the same segment.
    pub fn write_to<W: std::io::Write>(&self, out: W, options: &SaveOptions) -> Result<W> {
        if !options.is_supported_encoding() {
            return Err(Error::UnsupportedEncoding(options.encoding.clone()));
        }

        let wrapper = if self.options.include_root {
            self.check_single_root()?;
            None
        } else {
            Some(options.root_label.as_str())
        };

        let mut writer = match options.indent {
            Some(indent) => XmlWriter::with_indent(out, indent),
            None => XmlWriter::new(out),
        };
        writer
            .write_declaration(&options.encoding)
            .map_err(Error::Emit)?;
        write_tree(&self.properties, &mut writer, wrapper, &self.options)?;
        writer.finish().map_err(Error::Emit)
    }

    /// Fail unless the properties form exactly one root element.
    fn check_single_root(&self) -> Result<()> {
        let buckets = group_by_first_segment(&self.properties, self.options.separator)?;

        let mut segments = Vec::new();
        for (segment, bucket) in &buckets {
            if bucket.value.is_some() {
                segments.push(segment.clone());
            }
            if bucket.has_children() {
                segments.push(segment.clone());
            }
        }

        if segments.len() == 1 {
            Ok(())
        } else {
            Err(Error::MultipleRootSegments { segments })
        }
    }

    /// Serialize the store into a string.
    pub fn to_xml_string(&self, options: &SaveOptions) -> Result<String> {
        let bytes = self.write_to(Vec::new(), options)?;
        // XmlWriter only ever receives &str input
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write the store to `path` as an XML document.
    ///
    /// The document is fully rendered before the file is touched, so a
    /// rendering error leaves any existing file alone.
    pub fn save(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.write_to(Vec::new(), options)?;
        std::fs::write(path, bytes).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), count = self.properties.len(), "Saved configuration");
        Ok(())
    }

    /// Save to a fresh file in the system temp directory and return its path.
    ///
    /// The file is named `<uuid>[-label].xml`.
    pub fn save_temp(&self, label: Option<&str>, options: &SaveOptions) -> Result<PathBuf> {
        let mut filename = uuid::Uuid::new_v4().to_string();
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            filename.push('-');
            filename.push_str(label);
        }
        filename.push_str(".xml");

        let path = std::env::temp_dir().join(filename);
        self.save(&path, options)?;
        Ok(path)
    }
}

impl fmt::Display for PropertyStore {
    /// One `path -> value` line per property.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.properties {
            writeln!(f, "{} -> {}", key, value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PropertyStore {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a PropertyStore {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
