//! CSV rendering
//!
//! Cells are written verbatim with no quoting, so values containing commas,
//! quotes or newlines produce rows that don't parse back.

use std::collections::BTreeSet;

use firelens_core::{Document, ID_FIELD, display_value};

/// `id` followed by the union of the documents' field names, sorted
pub fn csv_header(docs: &[&Document]) -> Vec<String> {
    let names: BTreeSet<&str> = docs
        .iter()
        .flat_map(|doc| doc.fields.keys().map(String::as_str))
        .collect();
    std::iter::once(ID_FIELD)
        .chain(names.into_iter().filter(|name| *name != ID_FIELD))
        .map(str::to_string)
        .collect()
}

/// Header line plus one row per document, joined with `\n`
pub fn to_csv(docs: &[&Document]) -> String {
    let header = csv_header(docs);
    let mut lines = Vec::with_capacity(docs.len() + 1);
    lines.push(header.join(","));

    for doc in docs {
        let row: Vec<String> = header
            .iter()
            .map(|column| {
                doc.lookup(column)
                    .map(|value| display_value(&value))
                    .unwrap_or_default()
            })
            .collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn test_header_union_and_blank_cells() {
        let a = doc(json!({"id": "a", "n": 1}));
        let b = doc(json!({"id": "b", "m": 2}));
        assert_eq!(to_csv(&[&a, &b]), "id,m,n\na,,1\nb,2,");
    }

    #[test]
    fn test_values_render_as_display_text() {
        let a = doc(json!({"id": "a", "obj": {"k": [1]}, "none": null, "s": "x y", "t": true}));
        assert_eq!(
            to_csv(&[&a]),
            "id,none,obj,s,t\na,,{\"k\":[1]},x y,true"
        );
    }

    #[test]
    fn test_empty_input_is_header_only() {
        assert_eq!(to_csv(&[]), "id");
    }

    #[test]
    fn test_header_recomputed_per_call() {
        let a = doc(json!({"id": "a", "x": 1}));
        let b = doc(json!({"id": "b", "y": 1}));
        assert_eq!(csv_header(&[&a]), vec!["id", "x"]);
        assert_eq!(csv_header(&[&b]), vec!["id", "y"]);
    }
}
