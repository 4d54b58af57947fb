//! Decoder implementations

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::Value;

/// Check whether a body is an HTML page rather than structured data
///
/// An `<html` tag or doctype anywhere in the body counts, whatever precedes
/// it. Bodies that open as a JSON object or array are never HTML, even when a
/// string inside them mentions a tag.
pub fn looks_like_html(body: &str) -> bool {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return false;
    }

    let lower = trimmed.to_ascii_lowercase();
    lower.contains("<!doctype html") || lower.contains("<html")
}

/// Decode a response body as JSON
///
/// HTML bodies fail with [`Error::UnexpectedContent`] before any JSON parsing
/// is attempted; everything else that does not parse is [`Error::Decode`].
pub fn decode_json(url: &str, body: &str) -> Result<Value> {
    if looks_like_html(body) {
        return Err(Error::unexpected_content(url, body));
    }

    serde_json::from_str(body).map_err(|e| Error::Decode {
        message: format!("Failed to parse JSON from {url}: {e}"),
    })
}

/// Walk a dotted path through a JSON value
///
/// Accepts `$.data.token`, `data.token`, `imdata.0.aaaLogin` and
/// `imdata[0].aaaLogin`. Numeric segments index into arrays.
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let path = path.strip_prefix('$').unwrap_or(path);
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        let (name, indices) = split_indices(part)?;

        if !name.is_empty() {
            current = step(current, name)?;
        }
        for index in indices {
            current = current.as_array()?.get(index)?;
        }
    }

    Some(current)
}

/// One path segment: an object key, or an array index when the value is an array
fn step<'a>(value: &'a Value, part: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(part),
        Value::Array(arr) => arr.get(part.parse::<usize>().ok()?),
        _ => None,
    }
}

/// Split `name[0][1]` into `("name", [0, 1])`
fn split_indices(part: &str) -> Option<(&str, Vec<usize>)> {
    let Some(bracket) = part.find('[') else {
        return Some((part, Vec::new()));
    };

    let name = &part[..bracket];
    let mut indices = Vec::new();
    for raw in part[bracket..].split('[').skip(1) {
        let index = raw.strip_suffix(']')?.parse::<usize>().ok()?;
        indices.push(index);
    }
    Some((name, indices))
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
///
/// Without a path a bare array contributes its elements and a keyed object
/// contributes itself as one record. With a path the array found there
/// contributes its elements.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Record path, if any
    pub fn record_path(&self) -> Option<&str> {
        self.record_path.as_deref()
    }
}

impl RecordDecoder for JsonDecoder {
    fn records(&self, page: Value) -> Result<Vec<Value>> {
        let selected = match &self.record_path {
            Some(path) => match extract_path(&page, path) {
                Some(v) => v.clone(),
                None => {
                    tracing::warn!("Record path '{path}' not found in page, no records taken");
                    return Ok(Vec::new());
                }
            },
            None => page,
        };

        match selected {
            Value::Array(arr) => Ok(arr),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }
}
