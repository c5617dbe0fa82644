//! Error types for table construction, access, parsing and writing

use thiserror::Error;

/// Errors raised by csvtable
///
/// Contract violations (`InvalidState`, `InvalidArgument`, `OutOfBounds`,
/// `NotFound`) are returned at the point of violation and never recovered
/// internally. I/O failures propagate unchanged from the underlying stream.
#[derive(Debug, Error)]
pub enum TableError {
    /// The operation needs titles but the table was constructed untitled
    #[error("The current table contains no titles")]
    InvalidState,

    /// A caller-supplied sequence does not match the column count
    #[error("The length of the input ({actual}) is not compatible with the column count ({expected})")]
    InvalidArgument {
        /// Number of columns the table expects
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// A row or column index outside the table
    #[error("The requested field (row, column) = ({row}, {column}) is out of the bounds of ({rows}, {columns})")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// The referenced title does not exist
    #[error("There is no such title \"{0}\" in the current table")]
    NotFound(String),

    /// Reading or writing the byte stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoding label is not known
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// A remote source answered with something other than CSV
    #[error("Illegal content type: the response content type is \"{0}\", not \"text/csv\" as expected")]
    UnexpectedContentType(String),

    /// The input kind is not available in this build
    #[error("Unsupported input: {0}")]
    Unsupported(String),

    /// The HTTP request failed
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;

impl TableError {
    /// Create an OutOfBounds error for a table of the given dimensions
    pub fn out_of_bounds(row: usize, column: usize, rows: usize, columns: usize) -> Self {
        TableError::OutOfBounds {
            row,
            column,
            rows,
            columns,
        }
    }

    /// Create a NotFound error for a title
    pub fn not_found(title: &str) -> Self {
        TableError::NotFound(title.to_string())
    }
}
