use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::document::DocumentSnapshot;

/// Invitation document as read from the store, once, at creation time.
///
/// Fields are not validated; absent ones stay `None` and render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvitationRecord {
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub code: Option<String>,
    #[serde(default, rename = "businessId", deserialize_with = "scalar_text")]
    pub business_id: Option<String>,
}

/// Strings pass through, numbers and booleans become text, anything else is absent
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

impl InvitationRecord {
    pub fn new(email: &str, code: &str, business_id: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            code: Some(code.to_string()),
            business_id: Some(business_id.to_string()),
        }
    }

    pub fn from_snapshot(snapshot: &DocumentSnapshot) -> Self {
        Self {
            email: snapshot.text_field("email"),
            code: snapshot.text_field("code"),
            business_id: snapshot.text_field("businessId"),
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    pub fn business_id(&self) -> &str {
        self.business_id.as_deref().unwrap_or_default()
    }
}

/// Outbound email, derived from a record and dropped after submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}
