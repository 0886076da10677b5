//! Data model types

mod column;
mod item;
mod value;

pub use column::*;
pub use item::*;
pub use value::*;
