//! Class records used by the filter dropdown

use serde::Deserialize;
use serde::Serialize;

use super::types::RecordId;
use super::types::Scalar;

/// A school class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRef {
    /// Document-store identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Numeric identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Display name (e.g. "4B").
    pub name: String,
    /// Seat capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Grade level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Scalar>,
    /// Supervising teacher, as sent by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<serde_json::Value>,
}

impl ClassRef {
    /// Creates a class with a string identifier and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            object_id: Some(id.into()),
            id: None,
            name: name.into(),
            capacity: None,
            grade: None,
            supervisor: None,
        }
    }

    /// Returns the identifier used as the filter value.
    pub fn record_id(&self) -> Option<RecordId> {
        self.object_id
            .clone()
            .map(RecordId::Text)
            .or_else(|| self.id.clone())
    }
}
