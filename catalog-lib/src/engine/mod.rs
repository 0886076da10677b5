//! The tabular data engine
//!
//! [`TableEngine`] turns a flat collection of loosely typed items into a
//! filtered, sorted and paginated table body, rendered into a [`RowSink`].
//!
//! Operations and what they re-run:
//!
//! | Operation | Filter | Sort | Page reset | Render |
//! |-----------|--------|------|------------|--------|
//! | [`load`](TableEngine::load) | yes | yes | yes | yes |
//! | [`filter_and_render`](TableEngine::filter_and_render) | yes | yes | yes | yes |
//! | [`set_search_term`](TableEngine::set_search_term) | yes | yes | yes | yes |
//! | [`set_items_per_page`](TableEngine::set_items_per_page) | | | yes | yes |
//! | [`sort_by`](TableEngine::sort_by) | | yes | | yes |
//! | [`next_page`](TableEngine::next_page) and friends | | | | yes |

mod render;

use std::sync::Arc;

use log::debug;
use log::trace;
use log::warn;

use crate::error::ConfigError;
use crate::error::FetchError;
use crate::hooks::NoHooks;
use crate::hooks::TableHooks;
use crate::model::Column;
use crate::model::Item;
use crate::query::CustomSort;
use crate::query::Direction;
use crate::query::FilterFn;
use crate::query::PageInfo;
use crate::query::Pagination;
use crate::query::SortState;
use crate::query::default_filter;
use crate::query::filter_items;
use crate::query::sort_items;
use crate::settings::TableSettings;
use crate::sink::Row;
use crate::sink::RowSink;
use crate::source::DataSource;

/// A client-side table over one data source.
///
/// Configuration (source, columns, callbacks) is fixed at construction.
/// Runtime state (items, search term, sort, page) changes through the
/// operations below. Each page owns exactly one engine.
///
/// # Example
///
/// ```
/// use catalog_lib::engine::TableEngine;
/// use catalog_lib::model::Column;
/// use catalog_lib::sink::BufferSink;
/// use catalog_lib::source::MemorySource;
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # runtime.block_on(async {
/// let source = MemorySource::new(serde_json::json!([
///     { "id": "A", "name": "Zebra" },
///     { "id": "B", "name": "Apple" },
/// ]));
///
/// let mut engine = TableEngine::builder()
///     .source(source)
///     .sink(BufferSink::new())
///     .columns(vec![
///         Column::new("name", "Name").sortable(),
///         Column::new("id", "ID").sortable(),
///     ])
///     .build()
///     .unwrap();
///
/// engine.load().await.unwrap();
/// assert_eq!(engine.sink().column_text(0), vec!["Apple", "Zebra"]);
/// # });
/// ```
pub struct TableEngine<S> {
    source: Arc<dyn DataSource>,
    columns: Vec<Column>,
    filter_fn: FilterFn,
    custom_sort: Option<CustomSort>,
    hooks: Box<dyn TableHooks>,
    no_results_message: String,
    error_message: String,
    default_sort: SortState,
    sink: S,

    all_items: Vec<Item>,
    filtered_items: Vec<Item>,
    search_term: String,
    sort: SortState,
    pagination: Pagination,
}

impl TableEngine<Missing> {
    /// Creates a new builder with default settings.
    ///
    /// The sink type is fixed by [`TableEngineBuilder::sink`].
    pub fn builder() -> TableEngineBuilder<Missing, Missing> {
        TableEngineBuilder::new()
    }

    /// Creates a new builder from a settings block.
    pub fn builder_with_settings(settings: TableSettings) -> TableEngineBuilder<Missing, Missing> {
        TableEngineBuilder::with_settings(settings)
    }
}

impl<S: RowSink> TableEngine<S> {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches the data source and renders the result.
    ///
    /// A failure has already been reported through `on_fetch_error` and an
    /// error row when this returns `Err`; the previous items are kept. There
    /// is no retry, call `load` again to recover.
    pub async fn load(&mut self) -> Result<(), FetchError> {
        self.hooks.on_fetch_start();
        debug!("fetching table data from {}", self.source.locator());

        let source = Arc::clone(&self.source);
        let result = source.fetch().await;
        self.apply_payload(result)
    }

    /// Re-runs [`load`](Self::load).
    pub async fn fetch_data(&mut self) -> Result<(), FetchError> {
        self.load().await
    }

    /// Applies the outcome of a fetch made outside the engine.
    ///
    /// This is the second half of [`load`](Self::load). Pages that issue
    /// their own fetches through [`source`](Self::source) call it as each one
    /// resolves; the last result applied wins.
    pub fn apply_payload(
        &mut self,
        result: Result<serde_json::Value, FetchError>,
    ) -> Result<(), FetchError> {
        let items = result.and_then(|payload| match self.hooks.on_data_fetched(&payload) {
            Some(flattened) => flattened,
            None => Item::list_from_json(&payload),
        });

        match items {
            Ok(items) => {
                debug!(
                    "fetched {} items from {}",
                    items.len(),
                    self.source.locator()
                );
                self.all_items = items;
                self.hooks.on_fetch_complete(&self.all_items);
                self.filter_and_render();
                Ok(())
            }
            Err(error) => {
                warn!("failed to load {}: {}", self.source.locator(), error);
                self.hooks.on_fetch_error(&error);
                self.render_error(&error);
                Err(error)
            }
        }
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Recomputes the filtered set, returns to page 1, sorts and renders.
    ///
    /// The filter runs even for an empty search term, so a filter function
    /// that reads dropdown state works without any text search.
    pub fn filter_and_render(&mut self) {
        self.filtered_items = filter_items(&self.all_items, &self.search_term, &self.filter_fn);
        self.pagination.current_page = 1;
        self.sort_filtered();
        self.render();
    }

    /// Renders the current page of the filtered set without re-filtering.
    ///
    /// The current page is clamped first, so this is safe to call after
    /// mutating [`filtered_items_mut`](Self::filtered_items_mut).
    pub fn render(&mut self) {
        let filtered = self.filtered_items.len();
        self.pagination.clamp(filtered);
        let colspan = self.columns.len();

        self.sink.clear_body();
        if filtered == 0 {
            self.sink.append_row(Row::Empty {
                message: self.no_results_message.clone(),
                colspan,
            });
        } else {
            let range = self.pagination.range(filtered);
            for (index, item) in self.filtered_items[range].iter().enumerate() {
                self.sink.append_row(render::data_row(index, item, &self.columns));
            }
        }
        self.hooks.on_render_complete(filtered);

        let info = self.pagination.info(filtered);
        self.sink.set_page_info(&info);
        self.sink.set_prev_enabled(info.prev_enabled());
        self.sink.set_next_enabled(info.next_enabled());

        trace!(
            "rendered page {}/{} ({} filtered of {})",
            info.current_page,
            info.total_pages,
            filtered,
            self.all_items.len()
        );
    }

    fn render_error(&mut self, error: &FetchError) {
        self.sink.clear_body();
        self.sink.append_row(Row::Error {
            message: format!("{}: {}", self.error_message, error),
            colspan: self.columns.len(),
        });
    }

    fn sort_filtered(&mut self) {
        sort_items(&mut self.filtered_items, &self.sort, self.custom_sort.as_ref());
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Sets the search term and re-filters.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.filter_and_render();
    }

    /// Changes the page size, returns to page 1 and renders.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<(), ConfigError> {
        if items_per_page == 0 {
            return Err(ConfigError::ZeroItemsPerPage);
        }
        self.pagination.items_per_page = items_per_page;
        self.pagination.current_page = 1;
        self.render();
        Ok(())
    }

    /// Moves to the next page, if there is one.
    pub fn next_page(&mut self) {
        if self.pagination.has_next(self.filtered_items.len()) {
            self.pagination.current_page += 1;
            self.render();
        }
    }

    /// Moves to the previous page, if there is one.
    pub fn prev_page(&mut self) {
        if self.pagination.has_prev() {
            self.pagination.current_page -= 1;
            self.render();
        }
    }

    /// Moves to `page`, clamped to the valid range, and renders.
    pub fn go_to_page(&mut self, page: usize) {
        self.set_current_page(page);
        self.render();
    }

    /// Handles a header click on the column with key `field`.
    ///
    /// Clicking the sorted column flips the direction, any other sortable
    /// column sorts ascending. Returns `false` (and does nothing) for unknown
    /// or non-sortable columns.
    pub fn sort_by(&mut self, field: &str) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.key == field && column.sortable);
        if !sortable {
            return false;
        }
        self.sort.toggle(field);
        self.sort_filtered();
        self.render();
        true
    }

    /// Sets the sort explicitly, re-sorts and renders.
    pub fn set_sort(&mut self, field: impl Into<String>, direction: Direction) {
        self.sort = SortState {
            field: field.into(),
            direction,
        };
        self.sort_filtered();
        self.render();
    }

    /// Restores the configured default sort, re-sorts and renders.
    pub fn reset_sort(&mut self) {
        self.sort = self.default_sort.clone();
        self.sort_filtered();
        self.render();
    }

    /// Calls `on_row_activated` for the item behind a rendered row.
    ///
    /// `row` is the row's position on the current page. Returns `false` if no
    /// item is rendered there.
    pub fn activate_row(&mut self, row: usize) -> bool {
        let range = self.pagination.range(self.filtered_items.len());
        match self.filtered_items[range].get(row) {
            Some(item) => {
                self.hooks.on_row_activated(item);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Returns the data source.
    pub fn source(&self) -> Arc<dyn DataSource> {
        Arc::clone(&self.source)
    }

    /// Returns the column descriptors.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns every item from the last successful load.
    pub fn all_items(&self) -> &[Item] {
        &self.all_items
    }

    /// Returns the item list for in-place edits. Call
    /// [`filter_and_render`](Self::filter_and_render) afterwards.
    pub fn all_items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.all_items
    }

    /// Returns the filtered and sorted items.
    pub fn filtered_items(&self) -> &[Item] {
        &self.filtered_items
    }

    /// Returns the filtered items for in-place edits. Call
    /// [`render`](Self::render) afterwards.
    pub fn filtered_items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.filtered_items
    }

    /// Returns the items on the current page.
    pub fn page_items(&self) -> &[Item] {
        &self.filtered_items[self.pagination.range(self.filtered_items.len())]
    }

    /// Returns the item behind a rendered row on the current page.
    pub fn item_at_row(&self, row: usize) -> Option<&Item> {
        self.page_items().get(row)
    }

    /// Returns the current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    /// Sets the current page, clamped to the valid range. Does not render.
    pub fn set_current_page(&mut self, page: usize) {
        self.pagination.current_page = page;
        self.pagination.clamp(self.filtered_items.len());
    }

    /// Returns the page size.
    pub fn items_per_page(&self) -> usize {
        self.pagination.items_per_page
    }

    /// Returns the number of pages of the filtered set.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered_items.len())
    }

    /// Returns the pagination info of the current page.
    pub fn page_info(&self) -> PageInfo {
        self.pagination.info(self.filtered_items.len())
    }

    /// Returns the active search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns the active sort.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Returns the render target.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the render target mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`TableEngine`].
///
/// Uses the typestate pattern so the data source and sink must be set
/// before `build` is available.
///
/// # Required Fields
///
/// - `source` - a [`DataSource`] implementation
/// - `sink` - a [`RowSink`] implementation
/// - `columns` - at least one column, checked by `build`
pub struct TableEngineBuilder<Src, Snk> {
    source: Src,
    sink: Snk,
    columns: Vec<Column>,
    filter_fn: Option<FilterFn>,
    custom_sort: Option<CustomSort>,
    hooks: Option<Box<dyn TableHooks>>,
    settings: TableSettings,
}

impl TableEngineBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::with_settings(TableSettings::default())
    }

    /// Creates a new builder starting from `settings`.
    ///
    /// Individual setters called afterwards override the matching field.
    pub fn with_settings(settings: TableSettings) -> Self {
        Self {
            source: Missing,
            sink: Missing,
            columns: Vec::new(),
            filter_fn: None,
            custom_sort: None,
            hooks: None,
            settings,
        }
    }
}

impl Default for TableEngineBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TableEngineBuilder<Missing, K> {
    /// Sets the data source.
    pub fn source<T: DataSource + 'static>(
        self,
        source: T,
    ) -> TableEngineBuilder<Set<Arc<dyn DataSource>>, K> {
        self.shared_source(Arc::new(source))
    }

    /// Sets a data source shared with other owners.
    pub fn shared_source(
        self,
        source: Arc<dyn DataSource>,
    ) -> TableEngineBuilder<Set<Arc<dyn DataSource>>, K> {
        TableEngineBuilder {
            source: Set(source),
            sink: self.sink,
            columns: self.columns,
            filter_fn: self.filter_fn,
            custom_sort: self.custom_sort,
            hooks: self.hooks,
            settings: self.settings,
        }
    }
}

impl<D> TableEngineBuilder<D, Missing> {
    /// Sets the render target.
    pub fn sink<S: RowSink>(self, sink: S) -> TableEngineBuilder<D, Set<S>> {
        TableEngineBuilder {
            source: self.source,
            sink: Set(sink),
            columns: self.columns,
            filter_fn: self.filter_fn,
            custom_sort: self.custom_sort,
            hooks: self.hooks,
            settings: self.settings,
        }
    }
}

impl<D, K> TableEngineBuilder<D, K> {
    /// Sets the column descriptors.
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Appends one column descriptor.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Replaces the default search predicate.
    pub fn filter_fn<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Item, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_fn = Some(Arc::new(filter));
        self
    }

    /// Sets a prebuilt search predicate, e.g. from
    /// [`DropdownFilters::predicate`](crate::query::DropdownFilters::predicate).
    pub fn shared_filter_fn(mut self, filter: FilterFn) -> Self {
        self.filter_fn = Some(filter);
        self
    }

    /// Sets a comparator consulted before the default one.
    pub fn custom_sort<F>(mut self, sort: F) -> Self
    where
        F: Fn(&str, &Item, &Item, Direction) -> Option<std::cmp::Ordering> + Send + Sync + 'static,
    {
        self.custom_sort = Some(Arc::new(sort));
        self
    }

    /// Sets the initial sort field. Defaults to the first column's key.
    pub fn default_sort_field(mut self, field: impl Into<String>) -> Self {
        self.settings.default_sort_field = Some(field.into());
        self
    }

    /// Sets the initial sort direction. Defaults to ascending.
    pub fn default_direction(mut self, direction: Direction) -> Self {
        self.settings.default_direction = direction;
        self
    }

    /// Sets the page size. Defaults to 10.
    pub fn items_per_page(mut self, items_per_page: usize) -> Self {
        self.settings.items_per_page = items_per_page;
        self
    }

    /// Sets the text of the empty-state row.
    pub fn no_results_message(mut self, message: impl Into<String>) -> Self {
        self.settings.no_results_message = message.into();
        self
    }

    /// Sets the prefix of the error row.
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.settings.error_message = message.into();
        self
    }

    /// Sets the lifecycle hooks.
    pub fn hooks<H: TableHooks + 'static>(mut self, hooks: H) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }
}

impl<S: RowSink> TableEngineBuilder<Set<Arc<dyn DataSource>>, Set<S>> {
    /// Builds the [`TableEngine`].
    ///
    /// Only available once both `source` and `sink` have been set.
    pub fn build(self) -> Result<TableEngine<S>, ConfigError> {
        let Some(first) = self.columns.first() else {
            return Err(ConfigError::NoColumns);
        };
        if self.settings.items_per_page == 0 {
            return Err(ConfigError::ZeroItemsPerPage);
        }

        let default_sort = SortState {
            field: self
                .settings
                .default_sort_field
                .clone()
                .unwrap_or_else(|| first.key.clone()),
            direction: self.settings.default_direction,
        };

        Ok(TableEngine {
            source: self.source.0,
            columns: self.columns,
            filter_fn: self.filter_fn.unwrap_or_else(|| Arc::new(default_filter)),
            custom_sort: self.custom_sort,
            hooks: self.hooks.unwrap_or_else(|| Box::new(NoHooks)),
            no_results_message: self.settings.no_results_message,
            error_message: self.settings.error_message,
            sort: default_sort.clone(),
            default_sort,
            sink: self.sink.0,
            all_items: Vec::new(),
            filtered_items: Vec::new(),
            search_term: String::new(),
            pagination: Pagination::new(self.settings.items_per_page),
        })
    }
}
