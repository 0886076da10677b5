//! In-memory row sink

use super::Row;
use super::RowSink;
use crate::query::PageInfo;

/// A sink that records what was rendered.
///
/// Runs the engine headless: rows, page text and button state can be
/// inspected after each operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSink {
    rows: Vec<Row>,
    page_info: Option<PageInfo>,
    prev_enabled: bool,
    next_enabled: bool,
    clears: usize,
}

impl BufferSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rows currently in the body.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the last page info, if any was set.
    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page_info.as_ref()
    }

    /// Returns the page-info text, or an empty string.
    pub fn page_text(&self) -> String {
        self.page_info.map(|info| info.to_string()).unwrap_or_default()
    }

    /// Returns `true` if the previous button is enabled.
    pub fn prev_enabled(&self) -> bool {
        self.prev_enabled
    }

    /// Returns `true` if the next button is enabled.
    pub fn next_enabled(&self) -> bool {
        self.next_enabled
    }

    /// Returns how many times the body was cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Returns the text of one column for every data row.
    pub fn column_text(&self, column: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.cells().get(column))
            .map(|cell| cell.content.as_str().to_string())
            .collect()
    }
}

impl RowSink for BufferSink {
    fn clear_body(&mut self) {
        self.rows.clear();
        self.clears += 1;
    }

    fn append_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    fn set_page_info(&mut self, info: &PageInfo) {
        self.page_info = Some(*info);
    }

    fn set_prev_enabled(&mut self, enabled: bool) {
        self.prev_enabled = enabled;
    }

    fn set_next_enabled(&mut self, enabled: bool) {
        self.next_enabled = enabled;
    }
}
