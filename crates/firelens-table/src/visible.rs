use firelens_core::{CollectionSnapshot, Document};

use crate::{Filter, SortSpec, matches_filters, matches_search, sort_documents};

/// The documents to render, in display order.
///
/// A document is kept when it matches the search term and every filter.
/// With a sort the result is stably sorted; without one it keeps fetch order.
pub fn compute_visible<'a>(
    snapshot: &'a CollectionSnapshot,
    search_term: &str,
    filters: &[Filter],
    sort: Option<&SortSpec>,
) -> Vec<&'a Document> {
    let mut visible: Vec<&Document> = snapshot
        .documents
        .iter()
        .filter(|doc| matches_search(doc, search_term) && matches_filters(doc, filters))
        .collect();

    if let Some(spec) = sort {
        sort_documents(&mut visible, spec);
    }

    tracing::trace!(
        collection = %snapshot.collection,
        total = snapshot.len(),
        visible = visible.len(),
        "computed visible documents"
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot(values: Vec<serde_json::Value>) -> CollectionSnapshot {
        CollectionSnapshot::new(
            "items",
            values
                .into_iter()
                .map(|v| Document::from_value(v).unwrap())
                .collect(),
        )
    }

    fn ids(docs: &[&Document]) -> Vec<String> {
        docs.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn test_filter_example() {
        let snap = snapshot(vec![
            json!({"id": "a", "x": 10}),
            json!({"id": "b", "x": 21}),
            json!({"id": "c", "y": 1}),
        ]);
        let visible = compute_visible(&snap, "", &[Filter::new("x", "1")], None);
        assert_eq!(ids(&visible), vec!["a", "b"]);
    }

    #[test]
    fn test_search_then_sort() {
        let snap = snapshot(vec![
            json!({"id": "a", "name": "Carol", "team": "red"}),
            json!({"id": "b", "name": "alice", "team": "Red"}),
            json!({"id": "c", "name": "Bob", "team": "blue"}),
        ]);
        let visible = compute_visible(&snap, "RED", &[], Some(&SortSpec::ascending("name")));
        assert_eq!(ids(&visible), vec!["b", "a"]);
    }

    #[test]
    fn test_filters_are_anded() {
        let snap = snapshot(vec![
            json!({"id": "a", "x": "foo", "y": "bar"}),
            json!({"id": "b", "x": "foo", "y": "baz"}),
        ]);
        let filters = [Filter::new("x", "foo"), Filter::new("y", "bar")];
        assert_eq!(ids(&compute_visible(&snap, "", &filters, None)), vec!["a"]);
    }

    #[test]
    fn test_filter_on_absent_field_hides_everything() {
        let snap = snapshot(vec![json!({"id": "a", "x": 1})]);
        let visible = compute_visible(&snap, "", &[Filter::new("ghost", "")], None);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = CollectionSnapshot::empty("items");
        assert!(compute_visible(&snap, "x", &[], Some(&SortSpec::ascending("x"))).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let snap = snapshot(vec![
            json!({"id": "a", "n": 3}),
            json!({"id": "b", "n": 1}),
            json!({"id": "c"}),
        ]);
        let sort = SortSpec::descending("n");
        let first = ids(&compute_visible(&snap, "", &[], Some(&sort)));
        let second = ids(&compute_visible(&snap, "", &[], Some(&sort)));
        assert_eq!(first, second);
    }
}
