//! Data model for tabular data representation

mod field;
mod table;

pub use field::{quote, unquote};
pub use table::Table;
