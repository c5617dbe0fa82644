//! csvtable - Rectangular CSV tables
//!
//! A small library for holding comma-separated data as a fixed-size matrix of
//! strings with optional column titles, reading it from byte streams and
//! writing it back out.
//!
//! ```
//! use csvtable::{parser, Table};
//!
//! let mut table = Table::new(2, 1, true);
//! table.set_titles(vec!["Date".into(), "Close".into()]).unwrap();
//! table.set_field_by_title(0, "Date", "2013-04-15").unwrap();
//! table.set_field_by_title(0, "Close", "10.5").unwrap();
//! assert_eq!(table.render(), "Date,Close\r\n2013-04-15,10.5");
//!
//! let parsed = parser::parse(&table.render(), "\r\n", true).unwrap().unwrap();
//! assert_eq!(parsed.field_by_title(0, "Close").unwrap(), "10.5");
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod source;

pub use config::{ReaderConfig, WriterConfig};
pub use error::{Result, TableError};
pub use model::Table;
pub use output::Writer;
pub use parser::Reader;
