//! Render targets
//!
//! The engine never touches a UI toolkit. It clears and fills a [`RowSink`],
//! which a page implements over its DOM, terminal or test buffer.

mod buffer;

pub use buffer::*;

use crate::query::PageInfo;

/// How a cell's content should be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Literal text. Sinks must never interpret it as markup.
    Text(String),
    /// Markup produced by a column renderer, inserted as-is.
    Markup(String),
}

impl CellContent {
    /// Returns the raw content string.
    pub fn as_str(&self) -> &str {
        match self {
            CellContent::Text(s) | CellContent::Markup(s) => s,
        }
    }
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// The cell content.
    pub content: CellContent,
    /// Class copied from the column descriptor.
    pub class: Option<String>,
}

/// One row of the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A data row. `index` is the item's position on the current page.
    Data {
        /// Position on the current page, 0-based.
        index: usize,
        /// One cell per column.
        cells: Vec<Cell>,
    },
    /// The single row shown when the filtered set is empty.
    Empty {
        /// Configured "no results" text.
        message: String,
        /// Number of columns the row spans.
        colspan: usize,
    },
    /// The single row shown when a load failed.
    Error {
        /// Error text.
        message: String,
        /// Number of columns the row spans.
        colspan: usize,
    },
}

impl Row {
    /// Returns the CSS-style class of the row.
    pub fn class(&self) -> &'static str {
        match self {
            Row::Data { .. } => "data-row",
            Row::Empty { .. } => "no-results",
            Row::Error { .. } => "error-row",
        }
    }

    /// Returns the cells of a data row, or an empty slice.
    pub fn cells(&self) -> &[Cell] {
        match self {
            Row::Data { cells, .. } => cells,
            _ => &[],
        }
    }
}

/// A render target for table bodies and pagination controls.
///
/// A page without pagination controls can leave the page-info and button
/// methods as no-ops.
pub trait RowSink {
    /// Removes every row from the table body.
    fn clear_body(&mut self);

    /// Appends a row to the table body.
    fn append_row(&mut self, row: Row);

    /// Updates the page-info display.
    fn set_page_info(&mut self, _info: &PageInfo) {}

    /// Enables or disables the previous-page button.
    fn set_prev_enabled(&mut self, _enabled: bool) {}

    /// Enables or disables the next-page button.
    fn set_next_enabled(&mut self, _enabled: bool) {}
}

/// Escapes `&`, `<`, `>`, `"` and `'` for use inside markup.
///
/// Column renderers interpolating item text should run it through this.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup("<b>\"A&B\"</b>"),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_markup("plain"), "plain");
    }

    #[test]
    fn test_row_class() {
        let row = Row::Error {
            message: "down".into(),
            colspan: 3,
        };
        assert_eq!(row.class(), "error-row");
        assert!(row.cells().is_empty());
    }
}
