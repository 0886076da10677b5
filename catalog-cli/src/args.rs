//! Command-line arguments.

use std::path::PathBuf;

use catalog_lib::model::Column;
use clap::Parser;

/// Print one page of a catalog collection as a table.
#[derive(Debug, Parser)]
#[command(name = "catalog", version)]
pub struct Args {
    /// URL of the JSON collection, e.g. http://localhost:8080/api/services
    pub url: String,

    /// Columns to show, as `key` or `key=Label`, comma separated
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub columns: Vec<String>,

    /// Case-insensitive search over string fields
    #[arg(short, long)]
    pub search: Option<String>,

    /// Field to sort by (defaults to the first column)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page to show, 1-based
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Dropdown-style equality filter, repeatable
    #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,

    /// Key of the array inside an enveloped response, e.g. `data`
    #[arg(long, value_name = "KEY")]
    pub envelope: Option<String>,

    /// Settings file (defaults to settings.json in the config directory)
    #[arg(long, env = "CATALOG_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses a `key` or `key=Label` column argument. Every column is sortable.
pub fn parse_column(raw: &str) -> Column {
    match raw.split_once('=') {
        Some((key, label)) => Column::new(key.trim(), label.trim()).sortable(),
        None => Column::new(raw.trim(), raw.trim()).sortable(),
    }
}

/// Parses a `FIELD=VALUE` filter.
pub fn parse_filter(raw: &str) -> Option<(String, String)> {
    let (field, value) = raw.split_once('=')?;
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    Some((field.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_with_label() {
        let column = parse_column("gp_name=Generic Product");
        assert_eq!(column.key, "gp_name");
        assert_eq!(column.label, "Generic Product");
        assert!(column.sortable);
    }

    #[test]
    fn test_parse_column_bare_key() {
        let column = parse_column("status");
        assert_eq!(column.label, "status");
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("affiliate=North"),
            Some(("affiliate".to_string(), "North".to_string()))
        );
        assert_eq!(parse_filter("=North"), None);
        assert_eq!(parse_filter("affiliate"), None);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "catalog",
            "http://localhost/api/services",
            "--columns",
            "id,name=Name",
            "--filter",
            "affiliate=North",
            "--desc",
        ])
        .unwrap();
        assert_eq!(args.columns, vec!["id", "name=Name"]);
        assert_eq!(args.filters.len(), 1);
        assert!(args.desc);
        assert_eq!(args.page, 1);
    }
}
