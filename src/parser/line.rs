//! Line and field tokenization

/// Split text into non-empty lines on an exact delimiter string.
pub fn split_lines<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return if text.is_empty() { Vec::new() } else { vec![text] };
    }
    text.split(delimiter).filter(|line| !line.is_empty()).collect()
}

/// Split one line into fields.
///
/// A token opening with `"` absorbs the token after it: the opening quote of
/// the first and the closing quote of the second are dropped, the comma
/// between them is kept and `""` pairs collapse to `"`. An opening token at
/// the end of the line is kept verbatim, as are quoted fields spanning more
/// than one comma.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut tokens = line.split(',');
    let mut fields = Vec::new();

    while let Some(token) = tokens.next() {
        if let Some(head) = token.strip_prefix('"') {
            if let Some(next) = tokens.next() {
                let tail = next.strip_suffix('"').unwrap_or(next);
                fields.push(format!("{},{}", head, tail).replace("\"\"", "\""));
                continue;
            }
        }
        fields.push(token.to_string());
    }

    fields
}
