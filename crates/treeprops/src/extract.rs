//! Flattening a document tree into a [`PropertyMap`].

use crate::path::full_path;
use crate::{Error, PathOptions, PropertyMap, Result};
use std::collections::HashMap;
use treeprops_xml::Span;

/// A read-only view of one element of a parsed document.
///
/// Extraction only needs names, child elements, and direct text, so any
/// tree can be flattened once it exposes these. Implementations are
/// expected to be cheap handles that borrow from the underlying tree.
pub trait TreeNode: Sized {
    /// Element name, as used for the path segment.
    fn name(&self) -> &str;

    /// Child elements in document order. Text and other content are not
    /// children.
    fn children(&self) -> Vec<Self>;

    /// Direct text content; empty if there is none.
    fn text(&self) -> String;

    /// Where the element sits in the source, for error reporting.
    fn span(&self) -> Option<Span> {
        None
    }
}

/// Collect every leaf below `root` into a map keyed by its path.
///
/// A leaf is an element without child elements, even if it has text. Leaves
/// are visited in document order. The first path produced twice aborts the
/// whole extraction with [`Error::DuplicatePath`]; a tree without any
/// addressable leaf fails with [`Error::EmptyDocument`].
pub fn extract<N: TreeNode>(root: N, options: &PathOptions) -> Result<PropertyMap> {
    let mut properties = PropertyMap::new();
    let mut first_seen: HashMap<String, Option<Span>> = HashMap::new();

    // Names from the root down to the element being visited
    let mut ancestors: Vec<String> = Vec::new();
    let mut stack: Vec<(N, usize)> = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        ancestors.truncate(depth);
        ancestors.push(node.name().to_string());

        let children = node.children();
        if !children.is_empty() {
            // Reversed so the first child is visited next
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
            continue;
        }

        let path = full_path(
            ancestors.iter().rev().map(String::as_str),
            options.separator,
            options.include_root,
        );
        if path.is_empty() {
            tracing::debug!(element = %node.name(), "Skipping root leaf without a path");
            continue;
        }

        if let Some(first_span) = first_seen.get(&path) {
            return Err(Error::DuplicatePath {
                path,
                span: node.span(),
                first_span: *first_span,
            });
        }

        let value = node.text();
        tracing::debug!(path = %path, value = %value, "Add property");
        first_seen.insert(path.clone(), node.span());
        properties.insert(path, value);
    }

    if properties.is_empty() {
        return Err(Error::EmptyDocument);
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal in-memory tree to exercise extraction without XML.
    #[derive(Debug, Clone)]
    struct Node {
        name: &'static str,
        text: &'static str,
        children: Vec<Node>,
        offset: usize,
    }

    fn leaf(name: &'static str, text: &'static str) -> Node {
        Node {
            name,
            text,
            children: vec![],
            offset: 0,
        }
    }

    fn branch(name: &'static str, children: Vec<Node>) -> Node {
        Node {
            name,
            text: "",
            children,
            offset: 0,
        }
    }

    impl<'a> TreeNode for &'a Node {
        fn name(&self) -> &str {
            self.name
        }

        fn children(&self) -> Vec<Self> {
            let node: &'a Node = *self;
            node.children.iter().collect()
        }

        fn text(&self) -> String {
            self.text.to_string()
        }

        fn span(&self) -> Option<Span> {
            Some(Span::new(self.offset, self.offset + 1))
        }
    }

    #[test]
    fn test_extract_nested_leaves() {
        let tree = branch(
            "root",
            vec![
                branch("a", vec![leaf("b", "1"), leaf("c", "2")]),
                leaf("d", "3"),
            ],
        );

        let props = extract(&tree, &PathOptions::default()).unwrap();
        let entries: Vec<(&str, &str)> = props
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(entries, vec![("/a/b", "1"), ("/a/c", "2"), ("/d", "3")]);
    }

    #[test]
    fn test_extract_with_root_and_separator() {
        let tree = branch("root", vec![branch("a", vec![leaf("b", "1")])]);
        let options = PathOptions {
            separator: '.',
            include_root: true,
            ..PathOptions::default()
        };

        let props = extract(&tree, &options).unwrap();
        assert_eq!(props.get(".root.a.b").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_empty_leaf_has_empty_value() {
        let tree = branch("root", vec![leaf("flag", "")]);
        let props = extract(&tree, &PathOptions::default()).unwrap();
        assert_eq!(props.get("/flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut second = leaf("b", "2");
        second.offset = 20;
        let mut first = leaf("b", "1");
        first.offset = 10;
        let tree = branch("root", vec![branch("a", vec![first, second])]);

        match extract(&tree, &PathOptions::default()) {
            Err(Error::DuplicatePath {
                path,
                span,
                first_span,
            }) => {
                assert_eq!(path, "/a/b");
                assert_eq!(span, Some(Span::new(20, 21)));
                assert_eq!(first_span, Some(Span::new(10, 11)));
            }
            other => panic!("expected DuplicatePath, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_across_repeated_branches() {
        // Two sibling <a> sections each holding <b>
        let tree = branch(
            "root",
            vec![
                branch("a", vec![leaf("b", "1")]),
                branch("a", vec![leaf("b", "2")]),
            ],
        );
        assert!(matches!(
            extract(&tree, &PathOptions::default()),
            Err(Error::DuplicatePath { .. })
        ));
    }

    #[test]
    fn test_no_leaves_is_empty_document() {
        // The root alone is a leaf, but without the root name it has no path
        let tree = leaf("root", "value");
        assert!(matches!(
            extract(&tree, &PathOptions::default()),
            Err(Error::EmptyDocument)
        ));

        let options = PathOptions {
            include_root: true,
            ..PathOptions::default()
        };
        let props = extract(&tree, &options).unwrap();
        assert_eq!(props.get("/root").map(String::as_str), Some("value"));
    }
}
