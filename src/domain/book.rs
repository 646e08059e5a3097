//! Book record domain model.
//!
//! A [`BookRecord`] is one catalog entry as returned by the remote service.
//! The plugin never mutates records; they are replaced wholesale on every
//! successful load.

use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the remote book catalog.
///
/// # Wire format
///
/// Records arrive as JSON objects in the service's camelCase shape. The
/// identifier is accepted as either `_id` (document stores) or `id`, as a
/// string or a number, and is empty when absent. Unknown fields such as
/// `createdAt` are ignored.
///
/// ```json
/// { "_id": "65a1", "title": "Dune", "author": "Frank Herbert", "publishYear": 1965 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Opaque, stable identifier assigned by the service.
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "opaque_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(rename = "publishYear")]
    pub publish_year: i32,
}

/// Reads an identifier that may be a JSON string or number.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

impl BookRecord {
    /// Builds a record from its parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::BookRecord;
    ///
    /// let book = BookRecord::new("b1", "Dune", "Frank Herbert", 1965);
    /// assert_eq!(book.title, "Dune");
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        publish_year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            publish_year,
        }
    }

    /// The publish year rendered as decimal text, as matched by the year filter.
    #[must_use]
    pub fn year_text(&self) -> String {
        self.publish_year.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_shape_and_ignores_extra_fields() {
        let json = r#"{
            "_id": "65a1",
            "title": "Dune",
            "author": "Frank Herbert",
            "publishYear": 1965,
            "createdAt": "2024-01-12T10:00:00.000Z",
            "__v": 0
        }"#;

        let book: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(book, BookRecord::new("65a1", "Dune", "Frank Herbert", 1965));
    }

    #[test]
    fn accepts_plain_id_field() {
        let json = r#"{"id": "7", "title": "Emma", "author": "Jane Austen", "publishYear": 1815}"#;
        let book: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, "7");
    }

    #[test]
    fn numeric_id_becomes_text() {
        let json = r#"{"id": 42, "title": "Emma", "author": "Jane Austen", "publishYear": 1815}"#;
        let book: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, "42");
    }

    #[test]
    fn missing_id_is_empty() {
        let json = r#"{"title": "Emma", "author": "Jane Austen", "publishYear": 1815}"#;
        let book: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(book, BookRecord::new("", "Emma", "Jane Austen", 1815));
    }

    #[test]
    fn rejects_structured_id() {
        let json = r#"{"_id": {"$oid": "65a1"}, "title": "Emma", "author": "J",
            "publishYear": 1815}"#;
        assert!(serde_json::from_str::<BookRecord>(json).is_err());
    }

    #[test]
    fn year_text_is_plain_decimal() {
        let book = BookRecord::new("1", "Beowulf", "Unknown", 1000);
        assert_eq!(book.year_text(), "1000");
    }
}
