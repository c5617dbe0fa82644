//! JSON rendering

use serde::Serialize;

use crate::model::Table;

#[derive(Serialize)]
struct JsonTable<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    titles: Option<&'a [String]>,
    rows: Vec<&'a [String]>,
}

/// Render a table as `{"titles": [...], "rows": [[...], ...]}`
pub fn render_json(table: &Table, pretty: bool) -> serde_json::Result<String> {
    let output = JsonTable {
        titles: table.titles().ok(),
        rows: table.iter_rows().collect(),
    };

    if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
}
