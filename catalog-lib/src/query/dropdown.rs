//! Page-owned dropdown filters.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use super::FilterFn;
use crate::model::Item;
use crate::model::Value;

/// Equality filters chosen from dropdowns on a page.
///
/// The state belongs to the page, not the engine. Clones share the same
/// selections, so a page keeps one handle for its dropdown callbacks and
/// hands a [`predicate`](Self::predicate) to the engine. Changing a selection
/// takes effect on the next `filter_and_render()`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use catalog_lib::model::Item;
/// use catalog_lib::query::{DropdownFilters, default_filter};
///
/// let dropdowns = DropdownFilters::new();
/// let predicate = dropdowns.predicate(Arc::new(default_filter));
///
/// let item = Item::new().set("status", "Active").set("name", "Relay");
/// assert!(predicate(&item, ""));
///
/// dropdowns.set("status", "retired");
/// assert!(!predicate(&item, ""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DropdownFilters {
    selections: Arc<RwLock<BTreeMap<String, String>>>,
}

impl DropdownFilters {
    /// Creates an empty set of selections.
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoned guards are recovered: every write is a single map operation.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.selections.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.selections.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Selects `value` for `field`. An empty value clears the field.
    pub fn set(&self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        let mut guard = self.write();
        if value.is_empty() {
            guard.remove(&field);
        } else {
            guard.insert(field, value);
        }
    }

    /// Clears the selection for one field.
    pub fn clear_field(&self, field: &str) {
        self.write().remove(field);
    }

    /// Clears every selection.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Returns the active selections, ordered by field.
    pub fn selections(&self) -> Vec<(String, String)> {
        self.read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns `true` if no selection is active.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns `true` if the item satisfies every active selection.
    ///
    /// Comparison ignores case. An array field matches when any element does;
    /// a missing field never matches an active selection.
    pub fn matches(&self, item: &Item) -> bool {
        self.read().iter().all(|(field, wanted)| {
            let wanted = wanted.to_lowercase();
            match item.get(field) {
                None => false,
                Some(Value::Array(values)) => values
                    .iter()
                    .any(|v| v.display_text().to_lowercase() == wanted),
                Some(value) => value.display_text().to_lowercase() == wanted,
            }
        })
    }

    /// Combines these selections with a search predicate.
    ///
    /// The returned predicate reads the live selections on every call.
    pub fn predicate(&self, base: FilterFn) -> FilterFn {
        let dropdowns = self.clone();
        Arc::new(move |item: &Item, term: &str| dropdowns.matches(item) && base(item, term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::default_filter;

    fn product() -> Item {
        Item::new()
            .set("name", "Relay Station")
            .set("affiliate", "North")
            .set("services", vec!["Voice", "Data"])
    }

    #[test]
    fn test_empty_selection_matches() {
        let dropdowns = DropdownFilters::new();
        assert!(dropdowns.is_empty());
        assert!(dropdowns.matches(&product()));
    }

    #[test]
    fn test_selection_is_case_insensitive() {
        let dropdowns = DropdownFilters::new();
        dropdowns.set("affiliate", "north");
        assert!(dropdowns.matches(&product()));

        dropdowns.set("affiliate", "South");
        assert!(!dropdowns.matches(&product()));
    }

    #[test]
    fn test_array_field_matches_any_element() {
        let dropdowns = DropdownFilters::new();
        dropdowns.set("services", "data");
        assert!(dropdowns.matches(&product()));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let dropdowns = DropdownFilters::new();
        dropdowns.set("owner", "anyone");
        assert!(!dropdowns.matches(&product()));
    }

    #[test]
    fn test_empty_value_clears() {
        let dropdowns = DropdownFilters::new();
        dropdowns.set("affiliate", "South");
        dropdowns.set("affiliate", "");
        assert!(dropdowns.is_empty());
    }

    #[test]
    fn test_predicate_sees_later_changes() {
        let dropdowns = DropdownFilters::new();
        let predicate = dropdowns.predicate(Arc::new(default_filter));
        let item = product();

        assert!(predicate(&item, "relay"));
        dropdowns.set("affiliate", "South");
        assert!(!predicate(&item, "relay"));
        dropdowns.clear();
        assert!(predicate(&item, "relay"));
        assert!(!predicate(&item, "bridge"));
    }

    #[test]
    fn test_poisoned_lock_keeps_working() {
        let dropdowns = DropdownFilters::new();
        dropdowns.set("affiliate", "South");

        let handle = dropdowns.clone();
        let result = std::thread::spawn(move || {
            let _guard = handle.selections.write().unwrap();
            panic!("page callback failed");
        })
        .join();
        assert!(result.is_err());
        assert!(dropdowns.selections.is_poisoned());

        assert!(!dropdowns.matches(&product()));
        dropdowns.set("affiliate", "North");
        assert!(dropdowns.matches(&product()));
        dropdowns.clear();
        assert!(dropdowns.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let dropdowns = DropdownFilters::new();
        let handle = dropdowns.clone();
        handle.set("affiliate", "North");
        assert_eq!(
            dropdowns.selections(),
            vec![("affiliate".to_string(), "North".to_string())]
        );
    }
}
