//! Rebuilding a document tree from a [`PropertyMap`].

use crate::path::group_by_first_segment;
use crate::{Error, PathOptions, PropertyMap, Result};

/// Sink for element-at-a-time document output.
pub trait ElementWriter {
    fn start_element(&mut self, name: &str) -> Result<()>;

    /// Write escaped text inside the innermost open element.
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Close the innermost open element.
    fn end_element(&mut self) -> Result<()>;
}

/// Write `properties` as nested elements, one element per path segment.
///
/// With a `wrapper` label the whole tree is enclosed in one extra element of
/// that name. Siblings are written in ascending segment order, so the output
/// depends only on the map's contents.
///
/// A segment shared by a property and deeper properties (`/a` and `/a/b`)
/// is written as two sibling elements: `<a>value</a>` first, then `<a>` with
/// the nested elements.
pub fn write_tree<W: ElementWriter>(
    properties: &PropertyMap,
    writer: &mut W,
    wrapper: Option<&str>,
    options: &PathOptions,
) -> Result<()> {
    match wrapper {
        Some(label) => {
            writer.start_element(label)?;
            write_level(properties, writer, options, "", 1)?;
            writer.end_element()
        }
        None => write_level(properties, writer, options, "", 0),
    }
}

fn write_level<W: ElementWriter>(
    properties: &PropertyMap,
    writer: &mut W,
    options: &PathOptions,
    parent: &str,
    depth: usize,
) -> Result<()> {
    if depth > options.max_depth {
        return Err(Error::NestingTooDeep {
            max_depth: options.max_depth,
            path: parent.to_string(),
        });
    }

    let buckets = group_by_first_segment(properties, options.separator).map_err(|err| match err {
        Error::ConflictingPaths { first, second } => Error::ConflictingPaths {
            first: nested_path(parent, options.separator, &first),
            second: nested_path(parent, options.separator, &second),
        },
        other => other,
    })?;

    for (segment, bucket) in buckets {
        let path = format!("{}{}{}", parent, options.separator, segment);
        if !treeprops_xml::is_valid_name(&segment) {
            return Err(Error::InvalidSegment { path, segment });
        }

        if let Some(value) = &bucket.value {
            writer.start_element(&segment)?;
            writer.write_text(value)?;
            writer.end_element()?;
        }

        if bucket.has_children() {
            writer.start_element(&segment)?;
            write_level(&bucket.children, writer, options, &path, depth + 1)?;
            writer.end_element()?;
        }
    }

    Ok(())
}

/// Full path of `key`, a path relative to `parent`.
fn nested_path(parent: &str, separator: char, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", parent, separator, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls as a compact trace: `<a`, `"text"`, `>`.
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl ElementWriter for Trace {
        fn start_element(&mut self, name: &str) -> Result<()> {
            self.0.push(format!("<{name}"));
            Ok(())
        }

        fn write_text(&mut self, text: &str) -> Result<()> {
            self.0.push(format!("{text:?}"));
            Ok(())
        }

        fn end_element(&mut self) -> Result<()> {
            self.0.push(">".to_string());
            Ok(())
        }
    }

    fn map(entries: &[(&str, &str)]) -> PropertyMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn trace(properties: &PropertyMap, wrapper: Option<&str>) -> String {
        let mut writer = Trace::default();
        write_tree(properties, &mut writer, wrapper, &PathOptions::default()).unwrap();
        writer.0.join(" ")
    }

    #[test]
    fn test_grouped_in_lexicographic_order() {
        let props = map(&[("/d", "3"), ("/a/c", "2"), ("/a/b", "1")]);
        insta::assert_snapshot!(
            trace(&props, Some("config")),
            @r#"<config <a <b "1" > <c "2" > > <d "3" > >"#
        );
    }

    #[test]
    fn test_without_wrapper() {
        let props = map(&[("/a/b", "1")]);
        assert_eq!(trace(&props, None), r#"<a <b "1" > >"#);
    }

    #[test]
    fn test_leaf_and_branch_with_same_segment() {
        let props = map(&[("/a", "top"), ("/a/b", "nested")]);
        assert_eq!(
            trace(&props, None),
            r#"<a "top" > <a <b "nested" > >"#
        );
    }

    #[test]
    fn test_empty_value_still_written() {
        let props = map(&[("/flag", "")]);
        assert_eq!(trace(&props, None), r#"<flag "" >"#);
    }

    #[test]
    fn test_invalid_segment() {
        let props = map(&[("/a/1st", "1")]);
        let mut writer = Trace::default();
        match write_tree(&props, &mut writer, None, &PathOptions::default()) {
            Err(Error::InvalidSegment { path, segment }) => {
                assert_eq!(path, "/a/1st");
                assert_eq!(segment, "1st");
            }
            other => panic!("expected InvalidSegment, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_segment() {
        let props = map(&[("/", "1")]);
        let mut writer = Trace::default();
        assert!(matches!(
            write_tree(&props, &mut writer, None, &PathOptions::default()),
            Err(Error::InvalidSegment { segment, .. }) if segment.is_empty()
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let props = map(&[("/a/b/c/d", "deep")]);
        let options = PathOptions {
            max_depth: 2,
            ..PathOptions::default()
        };
        let mut writer = Trace::default();
        assert!(matches!(
            write_tree(&props, &mut writer, None, &options),
            Err(Error::NestingTooDeep { max_depth: 2, .. })
        ));
    }

    #[test]
    fn test_custom_separator() {
        let props = map(&[(".server.port", "80")]);
        let options = PathOptions {
            separator: '.',
            ..PathOptions::default()
        };
        let mut writer = Trace::default();
        write_tree(&props, &mut writer, None, &options).unwrap();
        assert_eq!(writer.0.join(" "), r#"<server <port "80" > >"#);
    }

    #[test]
    fn test_equivalent_paths_are_rejected() {
        let props = map(&[("/a", "slash"), ("a", "bare")]);
        let mut writer = Trace::default();
        assert!(matches!(
            write_tree(&props, &mut writer, Some("config"), &PathOptions::default()),
            Err(Error::ConflictingPaths { .. })
        ));
    }

    #[test]
    fn test_nested_equivalent_paths_report_full_path() {
        let props = map(&[("/a//b", "1"), ("/a/b", "2")]);
        let mut writer = Trace::default();
        match write_tree(&props, &mut writer, None, &PathOptions::default()) {
            Err(Error::ConflictingPaths { first, second }) => {
                assert_eq!(first, "/a//b");
                assert_eq!(second, "/a/b");
            }
            other => panic!("expected ConflictingPaths, got {:?}", other),
        }
    }
}
