use crate::casing::{key_for, pluralize};
use crate::locals::resolve;
use crate::*;

use serde_json::json;

#[test]
fn test_key_for_snake_passthrough() {
    assert_eq!(key_for("first_name", Format::Snake), "first_name");
    assert_eq!(key_for("id", Format::Snake), "id");
}

#[test]
fn test_key_for_camel_conversion() {
    assert_eq!(key_for("first_name", Format::Camel), "firstName");
    assert_eq!(key_for("a_b_c", Format::Camel), "aBC");
    assert_eq!(key_for("name", Format::Camel), "name");
}

#[test]
fn test_pluralize_regular_and_irregular_suffixes() {
    assert_eq!(pluralize("my_root"), "my_roots");
    assert_eq!(pluralize("bus"), "buses");
    assert_eq!(pluralize("box"), "boxes");
    assert_eq!(pluralize("buzz"), "buzzes");
    assert_eq!(pluralize("match"), "matches");
    assert_eq!(pluralize("dish"), "dishes");
    assert_eq!(pluralize("company"), "companies");
    assert_eq!(pluralize("day"), "days");
}

#[test]
fn test_attribute_dedup_preserves_first_seen_order() {
    let variant = SerializerVariant::declare("DedupSerializer")
        .attributes(["a", "b", "a", "c", "b"])
        .attributes(["c", "d"])
        .build();

    assert_eq!(variant.attributes(), ["a", "b", "c", "d"]);
}

#[test]
fn test_merge_source_dedup() {
    let variant = SerializerVariant::declare("MergeDedupSerializer")
        .merge_with(["x", "y", "x"])
        .build();

    assert_eq!(variant.merge_sources(), ["x", "y"]);
}

#[test]
fn test_derivation_snapshots_parent_state() {
    let parent = SerializerVariant::declare("SnapshotParent")
        .attributes(["first_name"])
        .merge_with(["extra"])
        .root("person")
        .format(Format::Camel)
        .build();

    let child = SerializerVariant::derive(&parent, "SnapshotChild")
        .attributes(["last_name"])
        .build();

    assert_eq!(child.attributes(), ["first_name", "last_name"]);
    assert_eq!(child.merge_sources(), ["extra"]);
    assert_eq!(child.root(), Some(&Root::Key("person".to_string())));
    // Casing is not inherited.
    assert_eq!(child.format(), Format::Snake);
    // The parent is unchanged by the derivation.
    assert_eq!(parent.attributes(), ["first_name"]);
}

#[test]
fn test_derivation_copies_unset_root() {
    let parent = SerializerVariant::declare("RootlessParent")
        .attributes(["id"])
        .build();
    let child = SerializerVariant::derive(&parent, "RootlessChild").build();

    assert_eq!(child.root(), None);
}

#[test]
fn test_resolve_absent_or_empty_locals_is_none() {
    assert!(resolve(None, "S").unwrap().is_none());
    assert!(resolve(Some(&json!(null)), "S").unwrap().is_none());
    assert!(resolve(Some(&json!({})), "S").unwrap().is_none());
}

#[test]
fn test_resolve_non_map_locals_is_an_error() {
    let err = resolve(Some(&json!("not_a_map")), "MySerializer").unwrap_err();
    let HashifyError::Locals { serializer } = err;
    assert_eq!(serializer, "MySerializer");
}

#[test]
fn test_resolve_map_locals_exposes_entries() {
    let locals = resolve(Some(&json!({"a": 1, "b": "two"})), "S")
        .unwrap()
        .unwrap();

    assert_eq!(locals.get("a").unwrap(), &json!(1));
    assert_eq!(locals.get("b").unwrap(), &json!("two"));
    assert!(locals.contains("a"));
    assert!(!locals.contains("c"));
    assert!(locals.get("c").is_err());
    assert_eq!(locals.names().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn test_config_paths_are_ordered_and_deduped() {
    config::set_serializer_paths(vec![]);
    config::add_serializer_path("app/serializers");
    config::add_serializer_path("lib/serializers");
    config::add_serializer_path("app/serializers");

    let paths = config::serializer_paths();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0], std::path::PathBuf::from("app/serializers"));
    assert_eq!(paths[1], std::path::PathBuf::from("lib/serializers"));
}
