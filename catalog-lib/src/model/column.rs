//! Column descriptors

use std::fmt;
use std::sync::Arc;

use super::Item;
use super::Value;

/// Maps a field value (and its item) to cell markup.
pub type CellRenderer = Arc<dyn Fn(&Value, &Item) -> String + Send + Sync>;

/// Describes one table column.
///
/// Declared once per page and handed to the engine, which never mutates it.
///
/// # Example
///
/// ```
/// use catalog_lib::model::Column;
///
/// let columns = vec![
///     Column::new("id", "ID").sortable(),
///     Column::new("name", "Name").sortable().cell_class("wide"),
///     Column::new("status", "Status")
///         .render(|value, _item| format!("<span class=\"badge\">{}</span>", value.display_text())),
/// ];
/// assert_eq!(columns.len(), 3);
/// ```
#[derive(Clone)]
pub struct Column {
    /// Field name read from each item.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Extra class applied to every cell of this column.
    pub cell_class: Option<String>,
    /// Custom cell renderer. Its output is inserted as markup.
    pub render: Option<CellRenderer>,
}

impl Column {
    /// Creates a new, non-sortable column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            cell_class: None,
            render: None,
        }
    }

    /// Makes the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets the cell class.
    pub fn cell_class(mut self, class: impl Into<String>) -> Self {
        self.cell_class = Some(class.into());
        self
    }

    /// Sets a custom renderer.
    ///
    /// The renderer is responsible for escaping anything it interpolates.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &Item) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("cell_class", &self.cell_class)
            .field("render", &self.render.is_some())
            .finish()
    }
}
