//! CSV encoding of datasets

use super::Record;
use serde_json::Value;
use std::borrow::Cow;

/// Encodes a dataset as CSV text.
///
/// The header is the first record's keys, unquoted, in their original order, and every
/// row is written in that field order. A record missing one of those keys gets an
/// empty field; keys the first record doesn't have are ignored. Lines are separated
/// by `\n` with no trailing newline, and an empty dataset encodes to an empty string.
pub fn to_csv(dataset: &[Record]) -> String {
    let Some(first) = dataset.first() else {
        return String::new();
    };

    let headers: Vec<&String> = first.keys().collect();
    let mut lines = Vec::with_capacity(dataset.len() + 1);
    // Field names are written as they are; only values are quoted
    lines.push(
        headers
            .iter()
            .map(|header| header.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in dataset {
        let line = headers
            .iter()
            .map(|header| {
                record
                    .get(header.as_str())
                    .map(field_text)
                    .map(|text| escape_field(&text).into_owned())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

/// String form of a single value as it appears in a cell.
pub(crate) fn field_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Number(number) => Cow::Owned(number.to_string()),
        Value::Bool(flag) => Cow::Owned(flag.to_string()),
        // Nested values keep their compact JSON text
        other => Cow::Owned(other.to_string()),
    }
}

/// Quotes a field iff it contains a comma, a double quote, or a newline.
fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
