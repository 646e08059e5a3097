//! Decoding of the catalog service's "list books" response.
//!
//! The service wraps its records in an envelope (`{"count": n, "data": [...]}`).
//! A bare JSON array is accepted as well; nothing else about the envelope is
//! relied upon.

use crate::domain::{BookRecord, FetchFailure};
use serde::Deserialize;
use serde_json::Value;

/// Longest body excerpt kept in a failure for logging.
const BODY_EXCERPT_CHARS: usize = 200;

/// Decodes a response body into book records.
///
/// # Errors
///
/// Returns [`FetchFailure::Malformed`] if the body is not JSON, has neither a
/// `data` array nor a top-level array, or contains a record of the wrong shape.
///
/// # Examples
///
/// ```
/// use bookshelf::catalog::decode_books;
///
/// let body = br#"{"count":1,"data":[
///     {"_id":"1","title":"Dune","author":"Frank Herbert","publishYear":1965}
/// ]}"#;
/// let books = decode_books(body).unwrap();
/// assert_eq!(books[0].title, "Dune");
/// ```
pub fn decode_books(body: &[u8]) -> Result<Vec<BookRecord>, FetchFailure> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| FetchFailure::Malformed(e.to_string()))?;

    let records = match value {
        Value::Array(_) => value,
        Value::Object(mut envelope) => envelope
            .remove("data")
            .ok_or_else(|| FetchFailure::Malformed("response has no `data` field".to_string()))?,
        other => {
            return Err(FetchFailure::Malformed(format!(
                "expected an array or an object, found {}",
                json_kind(&other)
            )))
        }
    };

    Vec::<BookRecord>::deserialize(records).map_err(|e| FetchFailure::Malformed(e.to_string()))
}

/// Maps a completed HTTP exchange to the outcome the fetch controller expects.
///
/// # Errors
///
/// Returns [`FetchFailure::Status`] for any non-2xx status and the errors of
/// [`decode_books`] otherwise.
pub fn response_outcome(status: u16, body: &[u8]) -> Result<Vec<BookRecord>, FetchFailure> {
    if !(200..300).contains(&status) {
        return Err(FetchFailure::Status {
            status,
            body: excerpt(body),
        });
    }
    decode_books(body)
}

fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_EXCERPT_CHARS)
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
