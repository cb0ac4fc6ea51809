use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use firelens_core::{Document, FirelensError};

use crate::{EditMode, FieldEntry, begin_edit, commit};

fn sample() -> Document {
    Document::from_value(json!({
        "id": "u1",
        "name": "Ada",
        "zip": "02139",
        "age": 36,
        "score": 9.5,
        "admin": false,
        "manager": null,
        "tags": ["x", "y"],
        "address": {"city": "London"}
    }))
    .unwrap()
}

#[test]
fn test_begin_edit_renders_sorted_views() {
    let state = begin_edit(&sample());
    assert_eq!(state.mode, EditMode::Text);
    assert!(!state.text.contains("\"id\""));

    let keys: Vec<&str> = state.fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["address", "admin", "age", "manager", "name", "score", "tags", "zip"]
    );

    let values: Vec<&str> = state.fields.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(
        values,
        vec![
            r#"{"city":"London"}"#,
            "false",
            "36",
            "null",
            "Ada",
            "9.5",
            r#"["x","y"]"#,
            "02139"
        ]
    );
}

#[test]
fn test_text_mode_round_trip() {
    let doc = sample();
    assert_eq!(commit(&begin_edit(&doc)).unwrap(), doc.fields);
}

#[test]
fn test_field_mode_round_trip() {
    let doc = sample();
    let mut state = begin_edit(&doc);
    state.switch_mode(EditMode::Fields).unwrap();
    assert_eq!(commit(&state).unwrap(), doc.fields);
}

#[test]
fn test_untouched_numeric_string_stays_a_string() {
    let mut state = begin_edit(&sample());
    state.switch_mode(EditMode::Fields).unwrap();
    let payload = state.commit().unwrap();
    assert_eq!(payload["zip"], json!("02139"));
}

#[test]
fn test_edited_field_values_parse_loosely() {
    let mut state = begin_edit(&sample());
    state.switch_mode(EditMode::Fields).unwrap();

    let age = state.fields.iter().position(|f| f.key == "age").unwrap();
    state.set_field_value(age, "37");
    let name = state.fields.iter().position(|f| f.key == "name").unwrap();
    state.set_field_value(name, "Ada L.");

    let payload = state.commit().unwrap();
    assert_eq!(payload["age"], json!(37));
    assert_eq!(payload["name"], json!("Ada L."));
}

#[test]
fn test_field_rows_add_rename_remove() {
    let doc = Document::from_value(json!({"id": "d", "a": 1, "b": 2})).unwrap();
    let mut state = begin_edit(&doc);
    state.switch_mode(EditMode::Fields).unwrap();

    state.add_field();
    state.set_field_key(2, "c");
    state.set_field_value(2, "[1,2]");
    state.set_field_key(0, "renamed");
    state.remove_field(1);
    state.remove_field(10);

    assert_eq!(
        Value::Object(state.commit().unwrap()),
        json!({"renamed": 1, "c": [1, 2]})
    );
}

#[test]
fn test_blank_keys_and_id_are_skipped() {
    let doc = Document::from_value(json!({"id": "d"})).unwrap();
    let mut state = begin_edit(&doc);
    state.switch_mode(EditMode::Fields).unwrap();
    state.fields.push(FieldEntry::new("", "lost"));
    state.fields.push(FieldEntry::new("id", "other"));
    state.fields.push(FieldEntry::new("kept", "yes"));

    assert_eq!(Value::Object(state.commit().unwrap()), json!({"kept": "yes"}));
}

#[test]
fn test_text_commit_strips_id() {
    let doc = Document::from_value(json!({"id": "d"})).unwrap();
    let mut state = begin_edit(&doc);
    state.apply_text_edit(r#"{"id": "forged", "x": 1}"#);
    assert_eq!(Value::Object(state.commit().unwrap()), json!({"x": 1}));
}

#[test]
fn test_text_commit_requires_object() {
    let doc = Document::from_value(json!({"id": "d"})).unwrap();
    let mut state = begin_edit(&doc);

    state.apply_text_edit("[1]");
    assert!(matches!(state.commit(), Err(FirelensError::InvalidFormat(_))));

    state.apply_text_edit("{broken");
    assert!(matches!(state.commit(), Err(FirelensError::InvalidFormat(_))));
}

#[test]
fn test_apply_text_edit_leaves_fields() {
    let doc = Document::from_value(json!({"id": "d", "a": 1})).unwrap();
    let mut state = begin_edit(&doc);
    let before = state.fields.clone();
    state.apply_text_edit(r#"{"b": 2}"#);
    assert_eq!(state.fields, before);
}

#[test]
fn test_switch_to_fields_resyncs_from_text() {
    let doc = Document::from_value(json!({"id": "d", "a": 1})).unwrap();
    let mut state = begin_edit(&doc);
    state.apply_text_edit(r#"{"z": true, "b": "two"}"#);
    state.switch_mode(EditMode::Fields).unwrap();

    let rows: Vec<(&str, &str)> = state
        .fields
        .iter()
        .map(|f| (f.key.as_str(), f.value.as_str()))
        .collect();
    assert_eq!(rows, vec![("b", "two"), ("z", "true")]);
}

#[test]
fn test_switch_with_invalid_text_keeps_mode() {
    let doc = Document::from_value(json!({"id": "d", "a": 1})).unwrap();
    let mut state = begin_edit(&doc);
    state.apply_text_edit("not json");

    let err = state.switch_mode(EditMode::Fields).unwrap_err();
    assert!(matches!(err, FirelensError::InvalidFormat(_)));
    assert_eq!(state.mode, EditMode::Text);
}

#[test]
fn test_switch_to_text_resyncs_from_fields() {
    let doc = Document::from_value(json!({"id": "d", "b": 1})).unwrap();
    let mut state = begin_edit(&doc);
    state.switch_mode(EditMode::Fields).unwrap();
    state.add_field();
    state.set_field_key(1, "a");
    state.set_field_value(1, "x");
    state.switch_mode(EditMode::Text).unwrap();

    assert_eq!(state.text, "{\n  \"a\": \"x\",\n  \"b\": 1\n}");
}
