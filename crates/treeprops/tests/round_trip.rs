//! Property-based checks that saving and reloading a store is lossless.

use proptest::prelude::*;
use treeprops::{PathOptions, PropertyMap, PropertyStore, SaveOptions};

/// Segment names that are valid element names and never contain `/`.
fn segment() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_.-]{0,6}"
}

fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|segments| format!("/{}", segments.join("/")))
}

/// Printable ASCII including the characters XML must escape, plus line
/// breaks, tabs, and non-ASCII text.
fn value() -> impl Strategy<Value = String> {
    "[ -~\t\r\n\u{e9}\u{4e2d}]{0,12}"
}

/// A property map together with its entries in some arbitrary order.
fn map_and_insertion_order() -> impl Strategy<Value = (PropertyMap, Vec<(String, String)>)> {
    prop::collection::btree_map(path(), value(), 1..24).prop_flat_map(|map| {
        let entries: Vec<(String, String)> = map.clone().into_iter().collect();
        (Just(map), Just(entries).prop_shuffle())
    })
}

/// A property map whose keys all start with the same root segment.
fn rooted_map() -> impl Strategy<Value = PropertyMap> {
    (segment(), prop::collection::btree_map(path(), value(), 1..16)).prop_map(|(root, map)| {
        map.into_iter()
            .map(|(path, value)| (format!("/{}{}", root, path), value))
            .collect()
    })
}

fn rooted_options() -> PathOptions {
    PathOptions {
        include_root: true,
        ..PathOptions::default()
    }
}

fn reload_rooted(store: &PropertyStore, options: &SaveOptions) -> PropertyStore {
    let xml = store.to_xml_string(options).unwrap();
    let mut reloaded = PropertyStore::with_options(rooted_options());
    reloaded
        .load_str(&xml)
        .unwrap_or_else(|err| panic!("failed to reload:\n{}\nerror: {}", xml, err));
    reloaded
}

fn reload(store: &PropertyStore, options: &SaveOptions) -> PropertyStore {
    let xml = store.to_xml_string(options).unwrap();
    PropertyStore::from_xml_str(&xml)
        .unwrap_or_else(|err| panic!("failed to reload:\n{}\nerror: {}", xml, err))
}

proptest! {
    #[test]
    fn indented_round_trip_preserves_map((map, entries) in map_and_insertion_order()) {
        let store: PropertyStore = entries.into_iter().collect();
        let reloaded = reload(&store, &SaveOptions::default());
        prop_assert_eq!(reloaded.properties(), &map);
    }

    #[test]
    fn compact_round_trip_preserves_map((map, entries) in map_and_insertion_order()) {
        let store: PropertyStore = entries.into_iter().collect();
        let reloaded = reload(&store, &SaveOptions::default().compact());
        prop_assert_eq!(reloaded.properties(), &map);
    }

    #[test]
    fn output_does_not_depend_on_insertion_order((_map, entries) in map_and_insertion_order()) {
        let forward: PropertyStore = entries.iter().cloned().collect();
        let backward: PropertyStore = entries.into_iter().rev().collect();

        let options = SaveOptions::default();
        prop_assert_eq!(
            forward.to_xml_string(&options).unwrap(),
            backward.to_xml_string(&options).unwrap()
        );
    }

    #[test]
    fn repeated_save_and_reload_does_not_drift((map, entries) in map_and_insertion_order()) {
        let options = SaveOptions::default();
        let store: PropertyStore = entries.into_iter().collect();

        let first = reload(&store, &options);
        let second = reload(&first, &options);

        prop_assert_eq!(first.properties(), &map);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            first.to_xml_string(&options).unwrap(),
            second.to_xml_string(&options).unwrap()
        );
    }

    #[test]
    fn rooted_save_and_reload_does_not_drift(map in rooted_map()) {
        let options = SaveOptions::default();
        let mut store = PropertyStore::with_options(rooted_options());
        store.extend(map.clone());

        let first = reload_rooted(&store, &options);
        let second = reload_rooted(&first, &options);

        prop_assert_eq!(first.properties(), &map);
        prop_assert_eq!(second.properties(), &map);
    }
}

#[test]
fn grouping_example_document() {
    let store: PropertyStore = [("/a/b", "1"), ("/a/c", "2"), ("/d", "3")]
        .into_iter()
        .collect();
    let xml = store.to_xml_string(&SaveOptions::default()).unwrap();

    let doc = treeprops_xml::parse(&xml).unwrap();
    assert_eq!(doc.root.name, "config");

    let top: Vec<&str> = doc
        .root
        .all_children()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(top, vec!["a", "d"]);

    let a = doc.root.get_children("a")[0];
    let inner: Vec<(&str, String)> = a
        .all_children()
        .iter()
        .map(|e| (e.name.as_str(), e.text_content()))
        .collect();
    assert_eq!(inner, vec![("b", "1".to_string()), ("c", "2".to_string())]);
    assert_eq!(doc.root.get_children("d")[0].text(), Some("3"));
}

#[test]
fn escaped_values_survive() {
    let store: PropertyStore = [("/expr", r#"a < b && c > "d" 'e'"#), ("/empty", "")]
        .into_iter()
        .collect();
    let reloaded = reload(&store, &SaveOptions::default());
    assert_eq!(reloaded.get("/expr").unwrap(), r#"a < b && c > "d" 'e'"#);
    assert_eq!(reloaded.get("/empty").unwrap(), "");
}

#[test]
fn line_breaks_and_non_ascii_survive() {
    let store: PropertyStore = [("/crlf", "l1\r\nl2"), ("/tab", "\u{e9}\tx"), ("/cjk", "\u{4e2d}\n")]
        .into_iter()
        .collect();
    let reloaded = reload(&store, &SaveOptions::default());
    assert_eq!(reloaded, store);
}
