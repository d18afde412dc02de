//! Teacher records

use serde::Deserialize;
use serde::Serialize;

use super::de::null_as_default;
use super::types::NamedRef;
use super::types::RecordId;
use super::types::UserLink;

/// A teacher as listed on the teachers page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Document-store identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Numeric or string identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Linked user account; its username is shown as the teacher ID.
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
}

impl Teacher {
    /// Creates a teacher with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            object_id: None,
            id: None,
            name: name.into(),
            surname: String::new(),
            email: None,
            photo: None,
            user: None,
            subjects: Vec::new(),
            classes: Vec::new(),
            phone: String::new(),
            address: String::new(),
        }
    }

    /// Returns the identifier, preferring the explicit `id` field.
    pub fn record_id(&self) -> Option<RecordId> {
        self.id
            .clone()
            .or_else(|| self.object_id.clone().map(RecordId::Text))
    }

    /// Returns the linked account's username, if any.
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().and_then(UserLink::username)
    }

    /// Returns `name surname`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }
}
