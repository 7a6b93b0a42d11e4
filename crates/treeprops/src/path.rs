//! Property paths: building them from ancestor chains and regrouping a flat
//! map by its leading segment.

use crate::{Error, PropertyMap, Result};
use std::collections::BTreeMap;

/// Separator used unless [`PathOptions`](crate::PathOptions) says otherwise.
pub const DEFAULT_SEPARATOR: char = '/';

/// Build the path of a leaf from its ancestor chain.
///
/// `ancestors` lists element names from the leaf up to the document root.
/// The result reads root to leaf, each name preceded by `separator`. The
/// root's own name is left out unless `include_root` is set.
///
/// Names are not escaped: a name containing the separator produces a path
/// with extra segments.
///
/// ```
/// use treeprops::path::full_path;
///
/// assert_eq!(full_path(["b", "a", "root"], '/', false), "/a/b");
/// assert_eq!(full_path(["b", "a", "root"], '/', true), "/root/a/b");
/// ```
pub fn full_path<'a, I>(ancestors: I, separator: char, include_root: bool) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = ancestors.into_iter().collect();
    let skip = usize::from(!include_root);

    let mut path = String::new();
    for name in names.iter().rev().skip(skip) {
        path.push(separator);
        path.push_str(name);
    }
    path
}

/// Split a path into its first segment and the remainder, if any.
///
/// One leading separator is ignored.
///
/// ```
/// use treeprops::path::split_first_segment;
///
/// assert_eq!(split_first_segment("/a/b/c", '/'), ("a", Some("b/c")));
/// assert_eq!(split_first_segment("a", '/'), ("a", None));
/// ```
pub fn split_first_segment(path: &str, separator: char) -> (&str, Option<&str>) {
    let path = path.strip_prefix(separator).unwrap_or(path);
    match path.split_once(separator) {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

/// Everything a flat map holds under one leading segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    /// Value of a property that ends at this segment.
    pub value: Option<String>,

    /// Properties nested below this segment, keyed by their remaining path.
    pub children: PropertyMap,
}

impl Bucket {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Group a flat map by the first segment of each path.
///
/// This handles a single level: the children of each bucket are keyed by the
/// rest of their path and can be grouped again for the next level.
///
/// Paths that differ only by the optional leading separator would land in
/// the same slot and fail with [`Error::ConflictingPaths`].
pub fn group_by_first_segment(
    map: &PropertyMap,
    separator: char,
) -> Result<BTreeMap<String, Bucket>> {
    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();
    let mut claimed: BTreeMap<&str, &str> = BTreeMap::new();

    for (path, value) in map {
        let normalized = path.strip_prefix(separator).unwrap_or(path.as_str());
        if let Some(first) = claimed.insert(normalized, path.as_str()) {
            return Err(Error::ConflictingPaths {
                first: first.to_string(),
                second: path.clone(),
            });
        }

        let (head, rest) = split_first_segment(path, separator);
        let bucket = buckets.entry(head.to_string()).or_default();
        match rest {
            Some(rest) => {
                bucket.children.insert(rest.to_string(), value.clone());
            }
            None => bucket.value = Some(value.clone()),
        }
    }

    Ok(buckets)
}
