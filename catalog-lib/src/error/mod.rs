//! Error types

mod config;
mod fetch;

pub use config::*;
pub use fetch::*;

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Loading the table data failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The engine or one of its parts was misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
