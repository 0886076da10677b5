//! Catalog table engine library
//!
//! Client-side tables for the service catalog admin pages: fetch a JSON
//! collection, filter it by a search term, sort it, paginate it and render
//! the current page into a [`sink::RowSink`].
//!
//! The engine is independent of any UI toolkit. A page supplies a
//! [`source::DataSource`], its [`model::Column`] descriptors, optional
//! [`hooks::TableHooks`] and a sink, then drives the
//! [`engine::TableEngine`] from its input events.

pub mod engine;
pub mod error;
pub mod hooks;
pub mod model;
pub mod query;
pub mod settings;
pub mod sink;
pub mod source;

pub use engine::TableEngine;
pub use engine::TableEngineBuilder;
pub use error::Error;
