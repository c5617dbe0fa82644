//! The rectangular table of text fields

use std::fmt;

use rustc_hash::FxHashMap;

use crate::config::DEFAULT_DELIMITER;
use crate::error::{Result, TableError};

use super::field::quote;

/// Column titles plus the title → column index lookup
#[derive(Debug, Clone, PartialEq, Eq)]
struct Titles {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl Titles {
    fn new(names: Vec<String>) -> Self {
        let mut titles = Self {
            names,
            index: FxHashMap::default(),
        };
        titles.rebuild_index();
        titles
    }

    /// Later duplicates overwrite earlier ones
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, name) in self.names.iter().enumerate() {
            self.index.insert(name.clone(), i);
        }
    }
}

/// A fixed-size matrix of string fields with optional column titles.
///
/// The dimensions are fixed at construction; titles, fields and the row
/// delimiter stay mutable. Fields are never absent: unset fields are empty
/// strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: usize,
    columns: usize,
    titles: Option<Titles>,
    /// Row-major, `rows * columns` long
    cells: Vec<String>,
    delimiter: String,
}

impl Table {
    /// Create an all-empty table. Titled tables start with empty titles.
    pub fn new(columns: usize, rows: usize, titled: bool) -> Self {
        let titles = titled.then(|| Titles::new(vec![String::new(); columns]));
        Self {
            rows,
            columns,
            titles,
            cells: vec![String::new(); rows * columns],
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Build a table from complete rows.
    ///
    /// The column count comes from the titles when present, otherwise from the
    /// first record. Every record must have exactly that many fields.
    pub fn from_records(titles: Option<Vec<String>>, records: Vec<Vec<String>>) -> Result<Self> {
        let columns = titles
            .as_ref()
            .map(Vec::len)
            .or_else(|| records.first().map(Vec::len))
            .unwrap_or(0);

        if let Some(bad) = records.iter().find(|r| r.len() != columns) {
            return Err(TableError::InvalidArgument {
                expected: columns,
                actual: bad.len(),
            });
        }

        let rows = records.len();
        Ok(Self {
            rows,
            columns,
            titles: titles.map(Titles::new),
            cells: records.into_iter().flatten().collect(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        })
    }

    /// Number of data rows (the title row is not counted)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_titled(&self) -> bool {
        self.titles.is_some()
    }

    /// Get the column titles
    pub fn titles(&self) -> Result<&[String]> {
        self.titles
            .as_ref()
            .map(|t| t.names.as_slice())
            .ok_or(TableError::InvalidState)
    }

    /// Replace the column titles and rebuild the title index.
    ///
    /// Nothing changes when the length does not match the column count.
    pub fn set_titles(&mut self, names: Vec<String>) -> Result<()> {
        let columns = self.columns;
        let titles = self.titles.as_mut().ok_or(TableError::InvalidState)?;
        if names.len() != columns {
            return Err(TableError::InvalidArgument {
                expected: columns,
                actual: names.len(),
            });
        }
        titles.names = names;
        titles.rebuild_index();
        Ok(())
    }

    /// Column index of a title, `None` if no column carries it
    pub fn index_of(&self, title: &str) -> Result<Option<usize>> {
        let titles = self.titles.as_ref().ok_or(TableError::InvalidState)?;
        Ok(titles.index.get(title).copied())
    }

    fn resolve(&self, title: &str) -> Result<usize> {
        self.index_of(title)?
            .ok_or_else(|| TableError::not_found(title))
    }

    fn offset(&self, row: usize, column: usize) -> Result<usize> {
        if row >= self.rows || column >= self.columns {
            return Err(TableError::out_of_bounds(row, column, self.rows, self.columns));
        }
        Ok(row * self.columns + column)
    }

    /// Get a field by row and column index
    pub fn field(&self, row: usize, column: usize) -> Result<&str> {
        let offset = self.offset(row, column)?;
        Ok(&self.cells[offset])
    }

    /// Set a field by row and column index
    pub fn set_field(&mut self, row: usize, column: usize, value: impl Into<String>) -> Result<()> {
        let offset = self.offset(row, column)?;
        self.cells[offset] = value.into();
        Ok(())
    }

    /// Get a field by row index and column title
    pub fn field_by_title(&self, row: usize, title: &str) -> Result<&str> {
        let column = self.resolve(title)?;
        self.field(row, column)
    }

    /// Set a field by row index and column title
    pub fn set_field_by_title(
        &mut self,
        row: usize,
        title: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let column = self.resolve(title)?;
        self.set_field(row, column, value)
    }

    /// Borrow a whole row
    pub fn row(&self, row: usize) -> Result<&[String]> {
        if row >= self.rows {
            return Err(TableError::out_of_bounds(row, 0, self.rows, self.columns));
        }
        let start = row * self.columns;
        Ok(&self.cells[start..start + self.columns])
    }

    /// Iterate over the data rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        (0..self.rows).map(move |r| {
            let start = r * self.columns;
            &self.cells[start..start + self.columns]
        })
    }

    /// Indices of the rows whose `key` column equals `value`, in order
    pub fn matching_rows<'a>(
        &'a self,
        key: &str,
        value: &'a str,
    ) -> Result<impl Iterator<Item = usize> + 'a> {
        let column = self.resolve(key)?;
        Ok(self
            .iter_rows()
            .enumerate()
            .filter(move |(_, row)| row[column] == value)
            .map(|(index, _)| index))
    }

    /// Index of the first row whose `key` column equals `value`
    pub fn find_row(&self, key: &str, value: &str) -> Result<Option<usize>> {
        Ok(self.matching_rows(key, value)?.next())
    }

    /// Render the table using its own row delimiter
    pub fn render(&self) -> String {
        self.render_with(&self.delimiter)
    }

    /// Render the table as CSV text with the given row delimiter.
    ///
    /// The title row comes first when present. There is no delimiter after
    /// the final line.
    pub fn render_with(&self, delimiter: &str) -> String {
        let titles = self.titles.as_ref().map(|t| t.names.as_slice());
        titles
            .into_iter()
            .chain(self.iter_rows())
            .map(render_line)
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    /// Get the row delimiter used by [`Table::render`]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Set the row delimiter used by [`Table::render`]
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.delimiter = delimiter.into();
    }
}

fn render_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_table() -> Table {
        let mut table = Table::new(2, 2, true);
        table
            .set_titles(vec!["Date".to_string(), "Close".to_string()])
            .unwrap();
        table.set_field_by_title(0, "Date", "2013-04-15").unwrap();
        table.set_field_by_title(0, "Close", "10.5").unwrap();
        table.set_field_by_title(1, "Date", "2013-04-16").unwrap();
        table.set_field_by_title(1, "Close", "11.0").unwrap();
        table
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new(3, 2, false);
        assert_eq!(table.rows(), 2);
        assert_eq!(table.columns(), 3);
        assert!(!table.is_titled());
        assert!(table.iter_rows().all(|row| row.iter().all(String::is_empty)));
        assert_eq!(table.delimiter(), "\r\n");
    }

    #[test]
    fn test_render_titled_table() {
        let table = stock_table();
        assert_eq!(
            table.render(),
            "Date,Close\r\n2013-04-15,10.5\r\n2013-04-16,11.0"
        );
        assert_eq!(table.to_string(), table.render());
    }

    #[test]
    fn test_render_with_other_delimiter() {
        let table = stock_table();
        assert_eq!(
            table.render_with("\n"),
            "Date,Close\n2013-04-15,10.5\n2013-04-16,11.0"
        );
        assert_eq!(table.delimiter(), "\r\n");
    }

    #[test]
    fn test_render_quotes_fields() {
        let mut table = Table::new(2, 1, false);
        table.set_field(0, 0, "He said \"hi\", ok").unwrap();
        table.set_field(0, 1, "x").unwrap();
        assert_eq!(table.render(), "\"He said \"\"hi\"\", ok\",x");
    }

    #[test]
    fn test_untitled_table_rejects_title_operations() {
        let mut table = Table::new(2, 1, false);
        assert!(matches!(table.titles(), Err(TableError::InvalidState)));
        assert!(matches!(table.index_of("a"), Err(TableError::InvalidState)));
        assert!(matches!(
            table.set_titles(vec!["a".into(), "b".into()]),
            Err(TableError::InvalidState)
        ));
        assert!(matches!(
            table.field_by_title(0, "a"),
            Err(TableError::InvalidState)
        ));
    }

    #[test]
    fn test_set_titles_wrong_length_leaves_titles_alone() {
        let mut table = stock_table();
        let err = table
            .set_titles(vec!["A".into(), "B".into(), "C".into()])
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::InvalidArgument {
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(table.titles().unwrap(), ["Date", "Close"]);
        assert_eq!(table.index_of("Close").unwrap(), Some(1));
        assert_eq!(table.index_of("C").unwrap(), None);
    }

    #[test]
    fn test_duplicate_titles_last_wins() {
        let mut table = Table::new(3, 1, true);
        table
            .set_titles(vec!["a".into(), "b".into(), "a".into()])
            .unwrap();
        assert_eq!(table.index_of("a").unwrap(), Some(2));
        assert_eq!(table.index_of("b").unwrap(), Some(1));
    }

    #[test]
    fn test_bounds() {
        let mut table = Table::new(3, 2, false);
        assert!(table.set_field(1, 2, "last").is_ok());
        assert_eq!(table.field(1, 2).unwrap(), "last");

        assert!(matches!(
            table.field(2, 0),
            Err(TableError::OutOfBounds { row: 2, column: 0, rows: 2, columns: 3 })
        ));
        assert!(matches!(
            table.set_field(0, 3, "x"),
            Err(TableError::OutOfBounds { .. })
        ));
        assert!(matches!(table.row(2), Err(TableError::OutOfBounds { .. })));
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let mut table = stock_table();
        assert!(matches!(
            table.field_by_title(0, "Open"),
            Err(TableError::NotFound(t)) if t == "Open"
        ));
        assert!(matches!(
            table.set_field_by_title(0, "Open", "1"),
            Err(TableError::NotFound(_))
        ));
    }

    #[test]
    fn test_find_row() {
        let table = stock_table();
        assert_eq!(table.find_row("Date", "2013-04-16").unwrap(), Some(1));
        assert_eq!(table.find_row("Date", "2013-04-17").unwrap(), None);
        assert_eq!(table.field_by_title(1, "Close").unwrap(), "11.0");
    }

    #[test]
    fn test_matching_rows() {
        let mut table = stock_table();
        table.set_field_by_title(1, "Date", "2013-04-15").unwrap();
        let rows: Vec<usize> = table.matching_rows("Date", "2013-04-15").unwrap().collect();
        assert_eq!(rows, [0, 1]);
        assert_eq!(table.matching_rows("Date", "2013-04-17").unwrap().count(), 0);
        assert!(matches!(
            table.matching_rows("Volume", "1"),
            Err(TableError::NotFound(_))
        ));
    }

    #[test]
    fn test_from_records() {
        let table = Table::from_records(
            None,
            vec![
                vec!["a".into(), "b".into()],
                vec!["c".into(), "d".into()],
            ],
        )
        .unwrap();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.columns(), 2);
        assert_eq!(table.row(1).unwrap(), ["c", "d"]);

        let err = Table::from_records(
            Some(vec!["x".into()]),
            vec![vec!["a".into(), "b".into()]],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::InvalidArgument { expected: 1, actual: 2 }));
    }

    #[test]
    fn test_empty_table_renders_empty() {
        assert_eq!(Table::new(2, 0, false).render(), "");
        assert_eq!(Table::new(0, 0, true).render(), "");
    }
}
