use std::collections::BTreeSet;

use firelens_core::{CollectionSnapshot, ID_FIELD};

/// Union of field names across the snapshot: `id` first, the rest sorted
pub fn derive_columns(snapshot: &CollectionSnapshot) -> Vec<String> {
    let names: BTreeSet<&str> = snapshot
        .documents
        .iter()
        .flat_map(|doc| doc.fields.keys().map(String::as_str))
        .filter(|name| *name != ID_FIELD)
        .collect();

    std::iter::once(ID_FIELD)
        .chain(names)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use firelens_core::Document;
    use serde_json::json;

    #[test]
    fn test_empty_snapshot_has_id_column() {
        assert_eq!(derive_columns(&CollectionSnapshot::empty("users")), vec!["id"]);
    }

    #[test]
    fn test_union_sorted_with_id_first() {
        let snapshot = CollectionSnapshot::new(
            "users",
            vec![
                Document::from_value(json!({"id": "a", "zeta": 1, "alpha": 2})).unwrap(),
                Document::from_value(json!({"id": "b", "mid": 3, "alpha": 4})).unwrap(),
            ],
        );
        assert_eq!(derive_columns(&snapshot), vec!["id", "alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_independent_of_insertion_order() {
        let a = Document::from_value(json!({"id": "a", "b": 1, "a": 1})).unwrap();
        let b = Document::from_value(json!({"id": "b", "c": 1})).unwrap();
        let forward = CollectionSnapshot::new("c", vec![a.clone(), b.clone()]);
        let reverse = CollectionSnapshot::new("c", vec![b, a]);
        assert_eq!(derive_columns(&forward), derive_columns(&reverse));
    }
}
