//! Wire shapes of the document store's "document created" events.
//!
//! Field values arrive in the store's typed JSON encoding, e.g.
//! `{"email": {"stringValue": "a@b.com"}, "code": {"integerValue": "123456"}}`.

use std::collections::HashMap;

use serde::{de, Deserialize};
use serde_json::Value;

use super::invitation::InvitationRecord;

/// Collection whose creations trigger a notification
pub const INVITATIONS_COLLECTION: &str = "invitations";

/// Document snapshot carried by a trigger event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl DocumentSnapshot {
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        self.fields.get(key).map(FieldValue::from_json)
    }

    /// Textual form of a scalar field; `None` when absent, null or non-scalar
    pub fn text_field(&self, key: &str) -> Option<String> {
        self.field(key).and_then(|v| v.into_text())
    }
}

/// A decoded typed value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    /// Integers travel as decimal strings
    Integer(String),
    Double(f64),
    Boolean(bool),
    Timestamp(String),
    Null,
    /// Maps, arrays, references, bytes, geo points
    Other,
}

impl FieldValue {
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return FieldValue::Other;
        };

        if let Some(s) = object.get("stringValue").and_then(Value::as_str) {
            return FieldValue::String(s.to_string());
        }
        if let Some(i) = object.get("integerValue") {
            return match i {
                Value::String(s) => FieldValue::Integer(s.clone()),
                Value::Number(n) => FieldValue::Integer(n.to_string()),
                _ => FieldValue::Other,
            };
        }
        if let Some(d) = object.get("doubleValue").and_then(Value::as_f64) {
            return FieldValue::Double(d);
        }
        if let Some(b) = object.get("booleanValue").and_then(Value::as_bool) {
            return FieldValue::Boolean(b);
        }
        if let Some(t) = object.get("timestampValue").and_then(Value::as_str) {
            return FieldValue::Timestamp(t.to_string());
        }
        if object.contains_key("nullValue") {
            return FieldValue::Null;
        }

        FieldValue::Other
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::String(s) | FieldValue::Integer(s) | FieldValue::Timestamp(s) => Some(s),
            FieldValue::Double(d) => Some(d.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Null | FieldValue::Other => None,
        }
    }
}

/// `projects/{p}/databases/{d}/documents/{collection}/{document_id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath {
    pub collection: String,
    pub document_id: String,
}

impl DocumentPath {
    /// Accepts full resource names and bare `collection/id` paths.
    /// Subcollection documents are not top-level and yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let relative = match name.find("/documents/") {
            Some(idx) => &name[idx + "/documents/".len()..],
            None => name,
        };

        let mut segments = relative.trim_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(collection), Some(document_id), None)
                if !collection.is_empty() && !document_id.is_empty() =>
            {
                Some(Self {
                    collection: collection.to_string(),
                    document_id: document_id.to_string(),
                })
            }
            _ => None,
        }
    }

    /// Document id of a top-level `invitations/{invitationId}` name
    pub fn invitation_id(name: &str) -> Option<String> {
        Self::parse(name)
            .filter(|path| path.collection == INVITATIONS_COLLECTION)
            .map(|path| path.document_id)
    }
}

/// "Document created" event: the new snapshot plus the (absent) previous one
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreatedEvent {
    pub value: DocumentSnapshot,
    #[serde(default)]
    pub old_value: Option<DocumentSnapshot>,
    #[serde(default)]
    pub update_mask: Option<Value>,
}

/// Body accepted by the trigger endpoint
#[derive(Debug, Clone)]
pub enum TriggerPayload {
    Event(DocumentCreatedEvent),
    /// Bare record, for direct invocation
    Record(InvitationRecord),
}

impl TriggerPayload {
    /// Objects with a `value` key must decode as a full event; any other
    /// object is a bare record. Non-object bodies are rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(object) = value else {
            return Err(de::Error::custom("expected a JSON object"));
        };

        if object.contains_key("value") {
            serde_json::from_value(Value::Object(object)).map(TriggerPayload::Event)
        } else {
            serde_json::from_value(Value::Object(object)).map(TriggerPayload::Record)
        }
    }

    /// Raw resource name of the created document (if the event carried one) and the record
    pub fn into_parts(self) -> (Option<String>, InvitationRecord) {
        match self {
            TriggerPayload::Event(event) => {
                let record = InvitationRecord::from_snapshot(&event.value);
                (event.value.name, record)
            }
            TriggerPayload::Record(record) => (None, record),
        }
    }
}
