//! Lifecycle hooks

use crate::error::FetchError;
use crate::model::Item;

/// Callbacks the engine invokes at fixed points of its lifecycle.
///
/// Every method has a no-op default, so pages implement only what they need.
///
/// Order for a successful load: `on_fetch_start`, `on_data_fetched`,
/// `on_fetch_complete`, `on_render_complete`. For a failed load:
/// `on_fetch_start`, `on_fetch_error`.
pub trait TableHooks: Send {
    /// Called before the data source is asked for data.
    fn on_fetch_start(&mut self) {}

    /// Called with the raw payload of a successful fetch.
    ///
    /// Returning `Some(Ok(..))` replaces the stored item list. This is how a
    /// page flattens an envelope such as `{"data": [...]}`. `Some(Err(..))`
    /// fails the load with that error. Returning `None` keeps the payload,
    /// which must then be a JSON array of objects.
    fn on_data_fetched(
        &mut self,
        _payload: &serde_json::Value,
    ) -> Option<Result<Vec<Item>, FetchError>> {
        None
    }

    /// Called once the new item list is stored, before it is rendered.
    fn on_fetch_complete(&mut self, _items: &[Item]) {}

    /// Called once for every failed load.
    fn on_fetch_error(&mut self, _error: &FetchError) {}

    /// Called after every render with the size of the filtered set.
    fn on_render_complete(&mut self, _filtered_count: usize) {}

    /// Called when a rendered row is activated, e.g. clicked to edit.
    fn on_row_activated(&mut self, _item: &Item) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl TableHooks for NoHooks {}

type DataFetchedFn =
    Box<dyn FnMut(&serde_json::Value) -> Option<Result<Vec<Item>, FetchError>> + Send>;

/// Hooks assembled from optional closures.
///
/// # Example
///
/// ```
/// use catalog_lib::hooks::FnHooks;
/// use catalog_lib::model::Item;
///
/// let hooks = FnHooks::new()
///     .on_data_fetched(|payload| {
///         payload.get("services").map(Item::list_from_json)
///     })
///     .on_render_complete(|count| println!("{count} services"));
/// # let _ = hooks;
/// ```
#[derive(Default)]
pub struct FnHooks {
    fetch_start: Option<Box<dyn FnMut() + Send>>,
    data_fetched: Option<DataFetchedFn>,
    fetch_complete: Option<Box<dyn FnMut(&[Item]) + Send>>,
    fetch_error: Option<Box<dyn FnMut(&FetchError) + Send>>,
    render_complete: Option<Box<dyn FnMut(usize) + Send>>,
    row_activated: Option<Box<dyn FnMut(&Item) + Send>>,
}

impl FnHooks {
    /// Creates hooks with no callbacks set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fetch start callback.
    pub fn on_fetch_start(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.fetch_start = Some(Box::new(f));
        self
    }

    /// Sets the payload transform callback.
    pub fn on_data_fetched(
        mut self,
        f: impl FnMut(&serde_json::Value) -> Option<Result<Vec<Item>, FetchError>> + Send + 'static,
    ) -> Self {
        self.data_fetched = Some(Box::new(f));
        self
    }

    /// Sets the fetch complete callback.
    pub fn on_fetch_complete(mut self, f: impl FnMut(&[Item]) + Send + 'static) -> Self {
        self.fetch_complete = Some(Box::new(f));
        self
    }

    /// Sets the fetch error callback.
    pub fn on_fetch_error(mut self, f: impl FnMut(&FetchError) + Send + 'static) -> Self {
        self.fetch_error = Some(Box::new(f));
        self
    }

    /// Sets the render complete callback.
    pub fn on_render_complete(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.render_complete = Some(Box::new(f));
        self
    }

    /// Sets the row activation callback.
    pub fn on_row_activated(mut self, f: impl FnMut(&Item) + Send + 'static) -> Self {
        self.row_activated = Some(Box::new(f));
        self
    }
}

impl TableHooks for FnHooks {
    fn on_fetch_start(&mut self) {
        if let Some(f) = self.fetch_start.as_mut() {
            f();
        }
    }

    fn on_data_fetched(
        &mut self,
        payload: &serde_json::Value,
    ) -> Option<Result<Vec<Item>, FetchError>> {
        self.data_fetched.as_mut().and_then(|f| f(payload))
    }

    fn on_fetch_complete(&mut self, items: &[Item]) {
        if let Some(f) = self.fetch_complete.as_mut() {
            f(items);
        }
    }

    fn on_fetch_error(&mut self, error: &FetchError) {
        if let Some(f) = self.fetch_error.as_mut() {
            f(error);
        }
    }

    fn on_render_complete(&mut self, filtered_count: usize) {
        if let Some(f) = self.render_complete.as_mut() {
            f(filtered_count);
        }
    }

    fn on_row_activated(&mut self, item: &Item) {
        if let Some(f) = self.row_activated.as_mut() {
            f(item);
        }
    }
}

impl std::fmt::Debug for FnHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHooks")
            .field("fetch_start", &self.fetch_start.is_some())
            .field("data_fetched", &self.data_fetched.is_some())
            .field("fetch_complete", &self.fetch_complete.is_some())
            .field("fetch_error", &self.fetch_error.is_some())
            .field("render_complete", &self.render_complete.is_some())
            .field("row_activated", &self.row_activated.is_some())
            .finish()
    }
}
