//! Client-side filtering, sorting and pagination.
//!
//! These are the pure pieces of the table pipeline. The engine owns the
//! state and calls them in order: filter, sort, paginate.
//!
//! - [`FilterFn`] / [`default_filter`] - search predicate over one item
//! - [`DropdownFilters`] - shared, page-owned equality filters
//! - [`SortState`] / [`sort_items`] - ordering of the filtered set
//! - [`Pagination`] / [`PageInfo`] - page bounds and display text

mod dropdown;
mod filter;
mod order;
mod page;

pub use dropdown::DropdownFilters;
pub use filter::FilterFn;
pub use filter::default_filter;
pub use filter::filter_items;
pub use order::CustomSort;
pub use order::Direction;
pub use order::SortState;
pub use order::default_compare;
pub use order::sort_items;
pub use page::PageInfo;
pub use page::Pagination;
