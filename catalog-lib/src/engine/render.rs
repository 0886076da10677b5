//! Row construction

use crate::model::Column;
use crate::model::Item;
use crate::model::Value;
use crate::sink::Cell;
use crate::sink::CellContent;
use crate::sink::Row;

static NULL: Value = Value::Null;

/// Builds the data row for one item.
///
/// Columns with a renderer produce markup; all others produce the value's
/// display text as literal text. Missing fields render as null.
pub(super) fn data_row(index: usize, item: &Item, columns: &[Column]) -> Row {
    let cells = columns
        .iter()
        .map(|column| {
            let value = item.get(&column.key).unwrap_or(&NULL);
            let content = match &column.render {
                Some(render) => CellContent::Markup(render(value, item)),
                None => CellContent::Text(value.display_text()),
            };
            Cell {
                content,
                class: column.cell_class.clone(),
            }
        })
        .collect();

    Row::Data { index, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cells_are_text() {
        let columns = vec![Column::new("name", "Name").cell_class("wide")];
        let item = Item::new().set("name", "<script>");

        let row = data_row(0, &item, &columns);
        assert_eq!(
            row.cells()[0],
            Cell {
                content: CellContent::Text("<script>".into()),
                class: Some("wide".into()),
            }
        );
    }

    #[test]
    fn test_rendered_cells_are_markup() {
        let columns = vec![
            Column::new("status", "Status")
                .render(|value, item| format!("<em>{}:{}</em>", value.display_text(), item.fields().len())),
        ];
        let item = Item::new().set("status", "Open").set("id", "K-1");

        let row = data_row(3, &item, &columns);
        assert!(matches!(row, Row::Data { index: 3, .. }));
        assert_eq!(row.cells()[0].content, CellContent::Markup("<em>Open:2</em>".into()));
    }

    #[test]
    fn test_missing_field_renders_empty() {
        let columns = vec![Column::new("owner", "Owner")];
        let row = data_row(0, &Item::new(), &columns);
        assert_eq!(row.cells()[0].content.as_str(), "");
    }
}
