//! Input record type and content resolution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Payload fields checked for the primary text content, in priority order.
const TEXT_FIELDS: [&str; 4] = ["text", "content", "document", "data"];

/// Payload fields promoted into document metadata when present.
const SEED_FIELDS: [&str; 3] = ["source", "fileName", "fileType"];

/// One unit of source data received from the transport.
///
/// The payload is free-form JSON; the record never fails on shape. Text
/// resolution and metadata extraction are best-effort with defensive
/// fallbacks, so a malformed record still produces output documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRecord {
    /// Unique identifier for this record
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// The free-form key-value payload carrying the document
    pub payload: Value,
}

impl InputRecord {
    /// Create a record from a raw payload.
    pub fn new(payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
        }
    }

    /// Create a record from plain text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(serde_json::json!({ "text": text.into() }))
    }

    /// Resolve the primary text content of this record.
    ///
    /// Checks `text`, `content`, `document`, and `data` in that order and
    /// returns the first string value found. When none of them is a string
    /// the whole payload is serialized instead, so a malformed record never
    /// fails outright.
    pub fn resolve_text(&self) -> String {
        for field in TEXT_FIELDS {
            if let Some(text) = self.payload.get(field).and_then(Value::as_str) {
                return text.to_string();
            }
        }

        self.payload.to_string()
    }

    /// Build the seed metadata for documents derived from this record.
    ///
    /// Starts from the caller-supplied base metadata and overlays the
    /// `source`, `fileName`, and `fileType` payload fields when present.
    pub fn seed_metadata(&self, base: &Map<String, Value>) -> Map<String, Value> {
        let mut metadata = base.clone();

        for field in SEED_FIELDS {
            if let Some(value) = self.payload.get(field) {
                if !value.is_null() {
                    metadata.insert(field.to_string(), value.clone());
                }
            }
        }

        metadata
    }
}
