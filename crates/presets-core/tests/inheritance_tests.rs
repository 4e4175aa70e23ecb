//! Tests for inheritance chains and flattening

use pretty_assertions::assert_eq;
use presets_core::{PresetKind, PresetSet};
use presets_schema::NoSchemaCheck;
use presets_test_utils::{PresetTree, preset};
use serde_json::{Value, json};

fn presets_with(configure: Value) -> (PresetTree, PresetSet) {
    let tree = PresetTree::new().with_presets(json!({
        "version": 4,
        "configurePresets": configure
    }));
    let presets = PresetSet::builder()
        .schema_checker(NoSchemaCheck)
        .load(tree.root())
        .unwrap();
    (tree, presets)
}

fn chain_names(presets: &PresetSet, name: &str) -> Vec<String> {
    presets
        .inheritance_chain(PresetKind::Configure, name)
        .iter()
        .filter_map(|p| p.name().map(str::to_string))
        .collect()
}

#[test]
fn test_flatten_without_inherits_is_the_preset() {
    let (_tree, presets) = presets_with(json!([
        preset("solo", json!({"generator": "Ninja", "cacheVariables": {"A": "1"}}))
    ]));
    let flat = presets.flatten_preset(PresetKind::Configure, "solo");
    let original = presets.preset_by_name(PresetKind::Configure, "solo").unwrap();
    assert_eq!(&flat, original.fields());
}

#[test]
fn test_derived_values_override_base() {
    let (_tree, presets) = presets_with(json!([
        preset("base", json!({"hidden": true, "cacheVariables": {"VAR1": "a"}})),
        preset("derived", json!({"inherits": "base", "cacheVariables": {"VAR1": "b", "VAR2": "c"}}))
    ]));
    let flat = presets.flatten_preset(PresetKind::Configure, "derived");
    assert_eq!(flat["cacheVariables"], json!({"VAR1": "b", "VAR2": "c"}));
    assert!(!flat.contains_key("hidden"));
    assert!(!flat.contains_key("inherits"));
}

#[test]
fn test_own_hidden_survives() {
    let (_tree, presets) = presets_with(json!([
        preset("base", json!({"hidden": true})),
        preset("derived", json!({"inherits": ["base"], "hidden": true}))
    ]));
    let flat = presets.flatten_preset(PresetKind::Configure, "derived");
    assert_eq!(flat["hidden"], json!(true));
}

#[test]
fn test_later_parents_win() {
    let (_tree, presets) = presets_with(json!([
        preset("first", json!({"generator": "Ninja", "binaryDir": "one"})),
        preset("second", json!({"generator": "Unix Makefiles"})),
        preset("child", json!({"inherits": ["first", "second"]}))
    ]));
    let flat = presets.flatten_preset(PresetKind::Configure, "child");
    assert_eq!(flat["generator"], "Unix Makefiles");
    assert_eq!(flat["binaryDir"], "one");
    assert_eq!(chain_names(&presets, "child"), vec!["first", "second"]);
}

#[test]
fn test_diamond_lists_shared_ancestor_once() {
    let (_tree, presets) = presets_with(json!([
        preset("root", json!({"cacheVariables": {"R": "1"}})),
        preset("left", json!({"inherits": "root"})),
        preset("right", json!({"inherits": "root"})),
        preset("leaf", json!({"inherits": ["left", "right"]}))
    ]));
    assert_eq!(chain_names(&presets, "leaf"), vec!["root", "left", "right"]);
}

#[test]
fn test_ancestors_precede_parents() {
    let (_tree, presets) = presets_with(json!([
        preset("a", json!(null)),
        preset("b", json!({"inherits": "a"})),
        preset("c", json!({"inherits": "b"}))
    ]));
    assert_eq!(chain_names(&presets, "c"), vec!["a", "b"]);
}

#[test]
fn test_missing_parent_is_skipped() {
    let (_tree, presets) = presets_with(json!([
        preset("base", json!({"generator": "Ninja"})),
        preset("child", json!({"inherits": ["ghost", "base"]}))
    ]));
    assert_eq!(chain_names(&presets, "child"), vec!["base"]);
    let flat = presets.flatten_preset(PresetKind::Configure, "child");
    assert_eq!(flat["generator"], "Ninja");
}

#[test]
fn test_inheritance_cycle_terminates() {
    let (_tree, presets) = presets_with(json!([
        preset("a", json!({"inherits": "b", "binaryDir": "a"})),
        preset("b", json!({"inherits": "a", "generator": "Ninja"}))
    ]));
    assert_eq!(chain_names(&presets, "a"), vec!["b"]);
    let flat = presets.flatten_preset(PresetKind::Configure, "a");
    assert_eq!(flat["binaryDir"], "a");
    assert_eq!(flat["generator"], "Ninja");
}

#[test]
fn test_unknown_preset_flattens_to_nothing() {
    let (_tree, presets) = presets_with(json!([preset("a", json!(null))]));
    assert!(presets.flatten_preset(PresetKind::Configure, "nope").is_empty());
    assert!(presets.inheritance_chain(PresetKind::Configure, "nope").is_empty());
}

#[test]
fn test_parents_from_included_documents() {
    let tree = PresetTree::new()
        .with_presets(json!({
            "version": 4,
            "include": ["common.json"],
            "configurePresets": [preset("dev", json!({"inherits": "common"}))]
        }))
        .with_file(
            "common.json",
            json!({"configurePresets": [preset("common", json!({"generator": "Ninja"}))]}),
        );
    let presets = PresetSet::builder()
        .schema_checker(NoSchemaCheck)
        .load(tree.root())
        .unwrap();

    let chain = presets.inheritance_chain(PresetKind::Configure, "dev");
    assert_eq!(chain[0].origin(), "common.json");
    assert_eq!(presets.flatten_preset(PresetKind::Configure, "dev")["generator"], "Ninja");
}
