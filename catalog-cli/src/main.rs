mod args;
mod paths;
mod terminal;

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use catalog_lib::TableEngine;
use catalog_lib::error::ConfigError;
use catalog_lib::error::FetchError;
use catalog_lib::hooks::FnHooks;
use catalog_lib::model::Item;
use catalog_lib::query::Direction;
use catalog_lib::query::DropdownFilters;
use catalog_lib::query::default_filter;
use catalog_lib::settings::TableSettings;
use catalog_lib::source::HttpSource;
use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use args::Args;
use terminal::TerminalSink;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] catalog_lib::Error),
    #[error("invalid filter '{0}', expected FIELD=VALUE")]
    InvalidFilter(String),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Catalog(err.into())
    }
}

fn init_logging(verbose: bool) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        eprintln!("Failed to init logger: no home directory");
        return;
    };
    let file = match create_log_file(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to create log file {}: {}", path.display(), e);
            return;
        }
    };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = WriteLogger::init(level, Config::default(), file) {
        eprintln!("Failed to init logger: {}", e);
    }
}

/// Creates the log file along with its directory.
fn create_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    File::create(path)
}

/// Extracts the item array stored under `key` in an enveloped response.
fn flatten_envelope(payload: &serde_json::Value, key: &str) -> Result<Vec<Item>, FetchError> {
    match payload.get(key) {
        Some(list) => Item::list_from_json(list),
        None => Err(FetchError::parse(format!("response has no '{}' field", key))),
    }
}

/// Loads the settings file: an explicit path must exist, the default one may not.
fn load_settings(args: &Args) -> Result<TableSettings, ConfigError> {
    if let Some(path) = &args.settings {
        return TableSettings::from_json_file(path);
    }
    match paths::settings_file() {
        Some(path) if path.exists() => TableSettings::from_json_file(path),
        _ => Ok(TableSettings::default()),
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let mut settings = load_settings(&args)?;
    if let Some(per_page) = args.per_page {
        settings.items_per_page = per_page;
    }
    if let Some(field) = &args.sort {
        settings.default_sort_field = Some(field.clone());
    }
    if args.desc {
        settings.default_direction = Direction::Desc;
    }

    let mut source = HttpSource::builder(&args.url);
    if let Some(secs) = settings.timeout_secs {
        source = source.timeout(Duration::from_secs(secs));
    }
    let source = source.build()?;

    let dropdowns = DropdownFilters::new();
    for raw in &args.filters {
        let (field, value) =
            args::parse_filter(raw).ok_or_else(|| CliError::InvalidFilter(raw.clone()))?;
        dropdowns.set(field, value);
    }

    let columns: Vec<_> = args.columns.iter().map(|c| args::parse_column(c)).collect();
    let headers = columns.iter().map(|c| c.label.clone()).collect();

    let envelope = args.envelope.clone();
    let hooks = FnHooks::new()
        .on_data_fetched(move |payload| {
            let key = envelope.as_deref()?;
            Some(flatten_envelope(payload, key))
        })
        .on_render_complete(|count| info!("rendered {} matching items", count));

    let mut engine = TableEngine::builder_with_settings(settings)
        .source(source)
        .sink(TerminalSink::new(headers))
        .columns(columns)
        .shared_filter_fn(dropdowns.predicate(Arc::new(default_filter)))
        .hooks(hooks)
        .build()?;

    let loaded = engine.load().await;
    if loaded.is_ok() {
        if let Some(term) = &args.search {
            engine.set_search_term(term.clone());
        }
        engine.go_to_page(args.page);
    }

    engine.sink().print(&mut io::stdout().lock())?;
    loaded.map_err(|e| CliError::Catalog(e.into()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_log_file_reports_failure() {
        let dir = std::env::temp_dir().join(format!("catalog-log-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        assert!(create_log_file(&blocker.join("latest.log")).is_err());
        assert!(create_log_file(&dir.join("logs").join("latest.log")).is_ok());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_flatten_envelope() {
        let payload = serde_json::json!({"data": [{"id": "SVC-1"}], "total": 1});
        let items = flatten_envelope(&payload, "data").unwrap();
        assert_eq!(items[0].get_str("id"), Some("SVC-1"));
    }

    #[test]
    fn test_flatten_envelope_keeps_entry_error() {
        let payload = serde_json::json!({"data": [{"id": "SVC-1"}, 7]});
        let err = flatten_envelope(&payload, "data").unwrap_err();
        assert!(err.to_string().contains("item 1 is a JSON number"));
    }

    #[test]
    fn test_flatten_envelope_missing_key() {
        let payload = serde_json::json!({"results": []});
        let err = flatten_envelope(&payload, "data").unwrap_err();
        assert!(err.to_string().contains("no 'data' field"));
    }
}
