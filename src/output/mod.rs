//! Output layer: tables into bytes and display formats

mod json;
mod preview;

use std::fs::File;
use std::io::Write;
use std::ops::Deref;
use std::path::Path;

use crate::config::WriterConfig;
use crate::encoding;
use crate::error::Result;
use crate::model::Table;

pub use json::render_json;
pub use preview::render_preview;

/// Swaps a table's row delimiter for as long as it lives.
struct DelimiterOverride<'a> {
    table: &'a mut Table,
    saved: Option<String>,
}

impl<'a> DelimiterOverride<'a> {
    fn new(table: &'a mut Table, delimiter: &str) -> Self {
        let saved = if table.delimiter() == delimiter {
            None
        } else {
            let saved = table.delimiter().to_string();
            table.set_delimiter(delimiter);
            Some(saved)
        };
        Self { table, saved }
    }
}

impl Deref for DelimiterOverride<'_> {
    type Target = Table;

    fn deref(&self) -> &Table {
        self.table
    }
}

impl Drop for DelimiterOverride<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.table.set_delimiter(saved);
        }
    }
}

/// Writes tables to byte streams
#[derive(Debug, Clone, Default)]
pub struct Writer {
    config: WriterConfig,
}

impl Writer {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WriterConfig {
        &mut self.config
    }

    /// Write a table to a stream with this writer's delimiter and encoding.
    ///
    /// The table's own delimiter is restored afterwards. The stream is
    /// flushed and dropped before returning, also when writing fails.
    pub fn write<W: Write>(&self, table: &mut Table, mut out: W) -> Result<()> {
        let text = DelimiterOverride::new(table, &self.config.delimiter).render();
        let bytes = encoding::encode(&text, self.config.encoding);

        tracing::debug!(
            "Writing {} rows x {} columns ({} bytes, {})",
            table.rows(),
            table.columns(),
            bytes.len(),
            self.config.encoding.name()
        );
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }

    /// Write a table to a file, replacing its contents
    pub fn write_path(&self, table: &mut Table, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write(table, file)
    }
}
