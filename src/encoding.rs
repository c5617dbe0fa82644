//! Character encoding lookup and conversion

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

use crate::error::{Result, TableError};

/// Resolve an encoding label such as `utf-8`, `gbk` or `windows-1252`
pub fn resolve(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| TableError::UnknownEncoding(label.to_string()))
}

/// Decode bytes into text. A byte order mark overrides `encoding`.
///
/// Malformed sequences are replaced with U+FFFD.
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (text, actual, had_errors) = encoding.decode(bytes);
    if actual != encoding {
        tracing::debug!(
            "Byte order mark selects {} over {}",
            actual.name(),
            encoding.name()
        );
    }
    if had_errors {
        tracing::warn!("Input is not valid {}; malformed bytes replaced", actual.name());
    }
    text
}

/// Encode text for output.
///
/// encoding_rs only encodes ASCII-compatible encodings, so UTF-16 is written
/// here as code units in the requested byte order, without a byte order mark.
/// Unmappable characters become numeric character references.
pub fn encode<'a>(text: &'a str, encoding: &'static Encoding) -> Cow<'a, [u8]> {
    if encoding == UTF_16LE {
        return Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
    }
    if encoding == UTF_16BE {
        return Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }

    let (bytes, actual, had_unmappable) = encoding.encode(text);
    if actual != encoding {
        tracing::debug!("{} output is written as {}", encoding.name(), actual.name());
    }
    if had_unmappable {
        tracing::warn!("Some characters cannot be represented in {}", actual.name());
    }
    bytes
}
