//! Boxed terminal preview of a table

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::Table;

/// Render a table as an aligned grid, titles first when present.
///
/// At most `limit` data rows are shown; a trailing note counts the rest.
pub fn render_preview(table: &Table, limit: Option<usize>) -> String {
    let mut builder = Builder::default();
    if let Ok(titles) = table.titles() {
        builder.push_record(titles.iter().cloned());
    }

    let shown = limit.unwrap_or(table.rows()).min(table.rows());
    for row in table.iter_rows().take(shown) {
        builder.push_record(row.iter().cloned());
    }

    let mut grid = builder.build();
    grid.with(Style::modern());

    let mut output = grid.to_string();
    if shown < table.rows() {
        output.push_str(&format!("\n... {} more rows", table.rows() - shown));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_contains_fields() {
        let table = Table::from_records(
            Some(vec!["Date".into(), "Close".into()]),
            vec![vec!["2013-04-15".into(), "10.5".into()]],
        )
        .unwrap();
        let preview = render_preview(&table, None);
        assert!(preview.contains("Date"));
        assert!(preview.contains("2013-04-15"));
        assert!(!preview.contains("more rows"));
    }

    #[test]
    fn test_preview_limit() {
        let table = Table::from_records(
            None,
            (0..5).map(|i| vec![i.to_string()]).collect(),
        )
        .unwrap();
        let preview = render_preview(&table, Some(2));
        assert!(preview.contains('1'));
        assert!(!preview.contains('4'));
        assert!(preview.ends_with("... 3 more rows"));
    }
}
