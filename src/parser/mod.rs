//! Parser layer: bytes and text into tables

mod line;

use std::io::{BufReader, Read};
use std::path::Path;

use encoding_rs::Encoding;

use crate::config::ReaderConfig;
use crate::encoding;
use crate::error::Result;
use crate::model::Table;
use crate::source::{self, HttpOptions, Input};

pub use line::{split_fields, split_lines};

/// Parse CSV text into a table.
///
/// Returns `Ok(None)` when the text holds no lines. The first line fixes the
/// column count; a later line with more fields fails with `OutOfBounds`, one
/// with fewer leaves the remaining fields empty.
pub fn parse(text: &str, delimiter: &str, titled: bool) -> Result<Option<Table>> {
    let lines = split_lines(text, delimiter);
    let Some((first, rest)) = lines.split_first() else {
        return Ok(None);
    };

    let first = split_fields(first);
    let rows = if titled { rest.len() } else { lines.len() };
    let mut table = Table::new(first.len(), rows, titled);
    table.set_delimiter(delimiter);

    let mut row = 0;
    if titled {
        table.set_titles(first)?;
    } else {
        fill_row(&mut table, row, first)?;
        row += 1;
    }

    for line in rest {
        fill_row(&mut table, row, split_fields(line))?;
        row += 1;
    }

    tracing::debug!(
        "Parsed {} rows x {} columns (titled: {})",
        table.rows(),
        table.columns(),
        titled
    );
    Ok(Some(table))
}

fn fill_row(table: &mut Table, row: usize, fields: Vec<String>) -> Result<()> {
    for (column, field) in fields.into_iter().enumerate() {
        table.set_field(row, column, field)?;
    }
    Ok(())
}

/// Reads tables from byte streams
#[derive(Debug, Clone, Default)]
pub struct Reader {
    config: ReaderConfig,
}

impl Reader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ReaderConfig {
        &mut self.config
    }

    /// Parse already decoded text with this reader's delimiter and title flag
    pub fn parse(&self, text: &str) -> Result<Option<Table>> {
        parse(text, &self.config.delimiter, self.config.titled)
    }

    /// Read a whole stream and parse it. The stream is dropped before returning.
    pub fn read<R: Read>(&self, input: R) -> Result<Option<Table>> {
        self.read_with_encoding(input, self.config.encoding)
    }

    fn read_with_encoding<R: Read>(
        &self,
        input: R,
        charset: &'static Encoding,
    ) -> Result<Option<Table>> {
        let mut reader = BufReader::with_capacity(self.config.buffer_size, input);
        let mut bytes = Vec::with_capacity(self.config.buffer_size);
        reader.read_to_end(&mut bytes)?;
        drop(reader);

        tracing::debug!("Read {} bytes as {}", bytes.len(), charset.name());
        let text = encoding::decode(&bytes, charset);
        self.parse(&text)
    }

    /// Read a table from a file
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Option<Table>> {
        let file = source::open_path(path.as_ref())?;
        self.read(file)
    }

    /// Read a table from a URL.
    ///
    /// A charset declared by the server takes precedence over the configured
    /// encoding.
    pub fn read_url(&self, url: &str, options: &HttpOptions) -> Result<Option<Table>> {
        let fetched = source::fetch(url, options)?;
        let charset = fetched.charset.unwrap_or(self.config.encoding);
        self.read_with_encoding(fetched.body, charset)
    }

    /// Read from a path or URL
    pub fn read_input(&self, input: &Input, options: &HttpOptions) -> Result<Option<Table>> {
        match input {
            Input::Path(path) => self.read_path(path),
            Input::Url(url) => self.read_url(url, options),
        }
    }
}
