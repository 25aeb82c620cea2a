use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Book {
    /// Title key used for duplicate detection: trimmed and lower-cased.
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Body of `POST /books`. Fields stay loosely typed so validation can apply
/// its own coercion rules instead of failing inside the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<Value>,
}

// Keeps an explicit `null` distinguishable from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
