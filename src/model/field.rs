//! Field quoting rules

use std::borrow::Cow;

/// Escape a field for output.
///
/// Every `"` is doubled. If the result contains a comma, the whole field is
/// wrapped in double quotes. Fields needing neither are borrowed unchanged.
pub fn quote(field: &str) -> Cow<'_, str> {
    let has_comma = field.contains(',');
    let has_quote = field.contains('"');

    if !has_comma && !has_quote {
        return Cow::Borrowed(field);
    }

    let escaped = if has_quote {
        field.replace('"', "\"\"")
    } else {
        field.to_string()
    };

    if has_comma {
        Cow::Owned(format!("\"{}\"", escaped))
    } else {
        Cow::Owned(escaped)
    }
}

/// Reverse [`quote`] for a single, already isolated field.
pub fn unquote(field: &str) -> Cow<'_, str> {
    let inner = match field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        // Only comma-bearing fields are ever wrapped
        Some(inner) if inner.contains(',') => inner,
        _ => field,
    };

    if inner.contains("\"\"") {
        Cow::Owned(inner.replace("\"\"", "\""))
    } else {
        Cow::Borrowed(inner)
    }
}
