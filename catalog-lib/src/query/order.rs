//! Sort state and comparators.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::model::Item;
use crate::model::Value;

/// Sort direction for table columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z).
    #[default]
    Asc,
    /// Descending order (Z-A).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// Page-supplied comparator consulted before the default one.
///
/// Arguments are the sort field, the two items and the active direction.
/// Returning `Some` uses that ordering as-is (the callback applies the
/// direction itself); `None` falls back to [`default_compare`] for that pair.
pub type CustomSort = Arc<dyn Fn(&str, &Item, &Item, Direction) -> Option<Ordering> + Send + Sync>;

/// The active sort field and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Field the filtered set is ordered by.
    pub field: String,
    /// Direction of the ordering.
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    /// Applies a header click.
    ///
    /// Clicking the sorted field flips the direction; clicking another field
    /// sorts it ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field.to_string();
            self.direction = Direction::Asc;
        }
    }
}

fn sort_key(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => value.display_text().to_lowercase(),
    }
}

/// Compares two items on `field` the way the table does by default.
///
/// Arrays are joined with `", "`, null or missing values compare as the
/// empty string, and both sides are lower-cased before a lexical comparison.
/// Descending reverses the result.
pub fn default_compare(a: &Item, b: &Item, field: &str, direction: Direction) -> Ordering {
    let ordering = sort_key(a.get(field)).cmp(&sort_key(b.get(field)));
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// Sorts items in place by the given state.
///
/// Items whose keys compare equal get no secondary ordering. Their relative
/// order after a sort is not part of the contract.
///
/// A custom comparator that answers for some pairs only can mix two
/// orderings into one that is not total. Those sorts go through a merge sort
/// that accepts any comparator, so the result is some permutation of the
/// items rather than a panic.
pub fn sort_items(items: &mut Vec<Item>, state: &SortState, custom: Option<&CustomSort>) {
    let field = state.field.as_str();
    let direction = state.direction;
    match custom {
        None => items.sort_by(|a, b| default_compare(a, b, field, direction)),
        Some(custom) => {
            let mut compare = |a: &Item, b: &Item| {
                custom(field, a, b, direction)
                    .unwrap_or_else(|| default_compare(a, b, field, direction))
            };
            let sorted = merge_sort(std::mem::take(items), &mut compare);
            *items = sorted;
        }
    }
}

/// Stable top-down merge sort. Never inspects the comparator for consistency.
fn merge_sort<F>(mut items: Vec<Item>, compare: &mut F) -> Vec<Item>
where
    F: FnMut(&Item, &Item) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare);
    let right = merge_sort(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // Ties take the left item to stay stable
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().filter_map(|i| i.get_str("name")).collect()
    }

    #[test]
    fn test_toggle_same_field_flips_direction() {
        let mut state = SortState::asc("name");
        state.toggle("name");
        assert_eq!(state, SortState::desc("name"));
        state.toggle("name");
        assert_eq!(state, SortState::asc("name"));
    }

    #[test]
    fn test_toggle_other_field_resets_to_asc() {
        let mut state = SortState::desc("name");
        state.toggle("id");
        assert_eq!(state, SortState::asc("id"));
    }

    #[test]
    fn test_default_sort_ascending() {
        let mut items = vec![
            Item::new().set("id", "A").set("name", "Zebra"),
            Item::new().set("id", "B").set("name", "Apple"),
        ];
        sort_items(&mut items, &SortState::asc("name"), None);
        assert_eq!(names(&items), vec!["Apple", "Zebra"]);
    }

    #[test]
    fn test_default_sort_ignores_case_and_reverses() {
        let mut items = vec![
            Item::new().set("name", "bravo"),
            Item::new().set("name", "Alpha"),
            Item::new().set("name", "charlie"),
        ];
        sort_items(&mut items, &SortState::desc("name"), None);
        assert_eq!(names(&items), vec!["charlie", "bravo", "Alpha"]);
    }

    #[test]
    fn test_default_sort_nulls_and_missing_first() {
        let mut items = vec![
            Item::new().set("id", "1").set("name", "Mike"),
            Item::new().set("id", "2").set("name", Value::Null),
            Item::new().set("id", "3"),
        ];
        sort_items(&mut items, &SortState::asc("name"), None);
        assert_eq!(items[2].get_str("id"), Some("1"));
    }

    #[test]
    fn test_default_sort_joins_arrays() {
        let a = Item::new().set("tags", vec!["b", "a"]);
        let b = Item::new().set("tags", vec!["b"]);
        // "b, a" sorts after "b"
        assert_eq!(default_compare(&a, &b, "tags", Direction::Asc), Ordering::Greater);
    }

    #[test]
    fn test_default_sort_numbers_compare_as_text() {
        let a = Item::new().set("rank", 10);
        let b = Item::new().set("rank", 9);
        assert_eq!(default_compare(&a, &b, "rank", Direction::Asc), Ordering::Less);
    }

    #[test]
    fn test_custom_sort_takes_precedence() {
        let custom: CustomSort = Arc::new(|field: &str, a: &Item, b: &Item, direction: Direction| {
            if field != "rank" {
                return None;
            }
            let key = |item: &Item| match item.get("rank") {
                Some(Value::Int(n)) => *n,
                _ => 0,
            };
            let ordering = key(a).cmp(&key(b));
            Some(match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            })
        });

        let mut items = vec![
            Item::new().set("rank", 10).set("name", "ten"),
            Item::new().set("rank", 9).set("name", "nine"),
        ];
        sort_items(&mut items, &SortState::asc("rank"), Some(&custom));
        assert_eq!(names(&items), vec!["nine", "ten"]);

        // Fields the callback declines use the default comparator
        sort_items(&mut items, &SortState::asc("name"), Some(&custom));
        assert_eq!(names(&items), vec!["nine", "ten"]);
        sort_items(&mut items, &SortState::desc("name"), Some(&custom));
        assert_eq!(names(&items), vec!["ten", "nine"]);
    }

    #[test]
    fn test_partial_custom_sort_never_panics() {
        // Numbers compare numerically, anything else falls back to text, so
        // 9 < 10 but "10" < "5" < "9": not a total order
        let custom: CustomSort = Arc::new(|field: &str, a: &Item, b: &Item, _: Direction| {
            let key = |item: &Item| match item.get(field) {
                Some(Value::Int(n)) => Some(*n),
                _ => None,
            };
            Some(key(a)?.cmp(&key(b)?))
        });

        let mut items: Vec<Item> = (0..2000)
            .map(|i| {
                let rank = if i % 3 == 0 {
                    Value::from(format!("{}", (i * 7) % 100))
                } else {
                    Value::from(((i * 13) % 100) as i64)
                };
                Item::new().set("id", format!("L-{}", i)).set("rank", rank)
            })
            .collect();
        sort_items(&mut items, &SortState::asc("rank"), Some(&custom));

        assert_eq!(items.len(), 2000);
        let mut ids: Vec<_> = items.iter().filter_map(|i| i.get_str("id")).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 2000);
    }

    #[test]
    fn test_custom_sort_is_stable_on_ties() {
        let custom: CustomSort = Arc::new(|_: &str, _: &Item, _: &Item, _: Direction| {
            Some(Ordering::Equal)
        });
        let mut items = vec![
            Item::new().set("name", "c"),
            Item::new().set("name", "a"),
            Item::new().set("name", "b"),
        ];
        sort_items(&mut items, &SortState::asc("name"), Some(&custom));
        assert_eq!(names(&items), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_double_toggle_restores_order_for_distinct_keys() {
        let mut items = vec![
            Item::new().set("name", "Delta"),
            Item::new().set("name", "alpha"),
            Item::new().set("name", "Charlie"),
        ];
        let mut state = SortState::asc("name");
        sort_items(&mut items, &state, None);
        let first = names(&items).join(",");

        state.toggle("name");
        sort_items(&mut items, &state, None);
        state.toggle("name");
        sort_items(&mut items, &state, None);
        assert_eq!(names(&items).join(","), first);
    }
}
