//! Configuration for reading and writing tables

use encoding_rs::{Encoding, UTF_8};

/// Row delimiter used unless configured otherwise
pub const DEFAULT_DELIMITER: &str = "\r\n";

/// Read buffer capacity in bytes
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

/// Output format for the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Turn a delimiter name into the delimiter string.
///
/// Accepts `crlf`, `lf` and `cr`, or a literal string in which `\r`, `\n`
/// and `\t` escapes are expanded.
pub fn parse_delimiter(s: &str) -> String {
    match s.to_lowercase().as_str() {
        "crlf" => return "\r\n".to_string(),
        "lf" => return "\n".to_string(),
        "cr" => return "\r".to_string(),
        _ => {}
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Settings for [`crate::parser::Reader`]
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Character encoding of the input bytes
    pub encoding: &'static Encoding,
    /// Row delimiter expected between lines
    pub delimiter: String,
    /// Whether the first line holds column titles
    pub titled: bool,
    /// Capacity of the read buffer
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            delimiter: DEFAULT_DELIMITER.to_string(),
            titled: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input encoding
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the row delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Treat the first line as titles
    pub fn with_titled(mut self, titled: bool) -> Self {
        self.titled = titled;
        self
    }

    /// Set the read buffer capacity; zero falls back to the default
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = if buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            buffer_size
        };
        self
    }
}

/// Settings for [`crate::output::Writer`]
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Character encoding of the output bytes
    pub encoding: &'static Encoding,
    /// Row delimiter written between lines
    pub delimiter: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output encoding
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the row delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}
