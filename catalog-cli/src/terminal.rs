//! Plain-text table output.

use std::io;
use std::io::Write;

use catalog_lib::query::PageInfo;
use catalog_lib::sink::CellContent;
use catalog_lib::sink::Row;
use catalog_lib::sink::RowSink;
use unicode_width::UnicodeWidthStr;

/// Collects a rendered page and prints it as an aligned text table.
#[derive(Debug, Default)]
pub struct TerminalSink {
    headers: Vec<String>,
    rows: Vec<Row>,
    page_info: Option<PageInfo>,
    prev_enabled: bool,
    next_enabled: bool,
}

impl TerminalSink {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            ..Self::default()
        }
    }

    /// Writes the table followed by a pagination footer.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .filter_map(|row| match row {
                Row::Data { cells, .. } => Some(
                    cells
                        .iter()
                        .map(|cell| match &cell.content {
                            CellContent::Text(text) => text.clone(),
                            CellContent::Markup(markup) => strip_markup(markup),
                        })
                        .collect(),
                ),
                _ => None,
            })
            .collect();

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.width());
            }
        }

        write_line(out, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(out, &rule, &widths)?;

        for row in &self.rows {
            match row {
                Row::Empty { message, .. } | Row::Error { message, .. } => {
                    writeln!(out, "{}", message)?;
                }
                Row::Data { .. } => {}
            }
        }
        for cells in &body {
            write_line(out, cells, &widths)?;
        }

        if let Some(info) = &self.page_info {
            let prev = if self.prev_enabled { "<" } else { " " };
            let next = if self.next_enabled { ">" } else { " " };
            writeln!(out)?;
            writeln!(out, "{} {} ({} items) {}", prev, info, info.filtered_count, next)?;
        }
        Ok(())
    }
}

impl RowSink for TerminalSink {
    fn clear_body(&mut self) {
        self.rows.clear();
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

fn write_line(out: &mut impl Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}

/// Drops tags and decodes the entities produced by `escape_markup`.
fn strip_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use catalog_lib::sink::Cell;

    use super::*;

    fn text(s: &str) -> Cell {
        Cell {
            content: CellContent::Text(s.into()),
            class: None,
        }
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>Data &amp; Voice</b>"), "Data & Voice");
    }

    #[test]
    fn test_print_aligns_columns() {
        let mut sink = TerminalSink::new(vec!["ID".into(), "Name".into()]);
        sink.append_row(Row::Data {
            index: 0,
            cells: vec![text("SVC-100"), text("Relay")],
        });
        sink.append_row(Row::Data {
            index: 1,
            cells: vec![text("S-2"), text("Bridge")],
        });
        sink.set_page_info(&PageInfo {
            current_page: 1,
            total_pages: 3,
            filtered_count: 24,
        });
        sink.set_next_enabled(true);

        let mut out = Vec::new();
        sink.print(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<_> = printed.lines().collect();

        assert_eq!(lines[0], "ID       Name");
        assert_eq!(lines[1], "-------  ------");
        assert_eq!(lines[2], "SVC-100  Relay");
        assert_eq!(lines[3], "S-2      Bridge");
        assert_eq!(lines[5], "  Page 1 of 3 (24 items) >");
    }

    #[test]
    fn test_print_error_row() {
        let mut sink = TerminalSink::new(vec!["ID".into()]);
        sink.append_row(Row::Error {
            message: "Error loading data: HTTP 500: down".into(),
            colspan: 1,
        });

        let mut out = Vec::new();
        sink.print(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("HTTP 500: down"));
    }
}
