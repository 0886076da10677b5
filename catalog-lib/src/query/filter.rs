//! Search predicates.

use std::sync::Arc;

use crate::model::Item;
use crate::model::Value;

/// Decides whether an item belongs to the filtered set for a search term.
///
/// The term is passed through untouched; predicates do their own case
/// folding. The predicate may consult page-owned state (see
/// [`DropdownFilters::predicate`](super::DropdownFilters::predicate)).
pub type FilterFn = Arc<dyn Fn(&Item, &str) -> bool + Send + Sync>;

/// The predicate used when a page does not supply its own.
///
/// Matches when any **string** field contains `term`, ignoring case. Arrays,
/// numbers and other non-string fields are not searched. An empty term
/// matches every item.
///
/// # Example
///
/// ```
/// use catalog_lib::model::Item;
/// use catalog_lib::query::default_filter;
///
/// let item = Item::new().set("id", "B").set("name", "Apple");
/// assert!(default_filter(&item, "b"));
/// assert!(!default_filter(&item, "zebra"));
/// ```
pub fn default_filter(item: &Item, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.fields().values().any(|value| match value {
        Value::String(s) => s.to_lowercase().contains(&needle),
        _ => false,
    })
}

/// Returns clones of the items accepted by `filter`.
///
/// Input order is preserved.
pub fn filter_items(items: &[Item], term: &str, filter: &FilterFn) -> Vec<Item> {
    items
        .iter()
        .filter(|item| filter(item, term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![
            Item::new().set("id", "A").set("name", "Zebra"),
            Item::new().set("id", "B").set("name", "Apple"),
            Item::new()
                .set("id", "C")
                .set("tags", vec!["bravo"])
                .set("count", 12),
        ]
    }

    #[test]
    fn test_default_filter_case_insensitive() {
        let item = Item::new().set("name", "Field Radio");
        assert!(default_filter(&item, "RADIO"));
        assert!(default_filter(&item, "field r"));
    }

    #[test]
    fn test_default_filter_ignores_non_string_fields() {
        let item = Item::new().set("tags", vec!["bravo"]).set("count", 12);
        assert!(!default_filter(&item, "bravo"));
        assert!(!default_filter(&item, "12"));
    }

    #[test]
    fn test_default_filter_empty_term_matches_all() {
        assert!(default_filter(&Item::new(), ""));
    }

    #[test]
    fn test_filter_items_matches_id_field() {
        let filter: FilterFn = Arc::new(default_filter);
        let filtered = filter_items(&items(), "b", &filter);

        // "Zebra" and the id "B" both contain a "b"; the array tag does not count
        let ids: Vec<_> = filtered.iter().filter_map(|i| i.get_str("id")).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_filter_items_membership_matches_predicate() {
        let filter: FilterFn = Arc::new(|item: &Item, term: &str| item.get_str("id") == Some(term));
        let all = items();

        for term in ["A", "B", "C", "D", ""] {
            let filtered = filter_items(&all, term, &filter);
            for item in &all {
                assert_eq!(filtered.contains(item), filter(item, term));
            }
        }
    }
}
