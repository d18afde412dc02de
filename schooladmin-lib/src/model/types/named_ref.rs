//! Subject and class references embedded in person records

use serde::Deserialize;
use serde::Serialize;

use super::RecordId;

/// A reference to a subject or class as it appears on a person record.
///
/// Depending on whether the backend populated the relation, the same field
/// holds either bare names (`["Math", "Physics"]`) or objects
/// (`[{"_id": "...", "name": "Math"}]`). Both deserialize into this type so
/// rendering code only ever calls [`name`](Self::name).
///
/// # Example
///
/// ```
/// use schooladmin_lib::model::types::NamedRef;
///
/// let refs: Vec<NamedRef> = serde_json::from_str(r#"["1A", {"_id": "c2", "name": "2B"}]"#).unwrap();
/// assert_eq!(refs[0].name(), "1A");
/// assert_eq!(refs[1].name(), "2B");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamedRef {
    /// A bare display name.
    Name(String),
    /// A populated reference.
    Ref {
        /// Document-store identifier.
        #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
        object_id: Option<RecordId>,
        /// Plain identifier. Serialized virtuals send it next to `_id`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<RecordId>,
        /// Display name.
        name: String,
    },
}

impl NamedRef {
    /// Creates a bare-name reference.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a populated reference.
    pub fn with_id(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self::Ref {
            object_id: Some(id.into()),
            id: None,
            name: name.into(),
        }
    }

    /// Returns the display name regardless of shape.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Ref { name, .. } => name,
        }
    }

    /// Returns the identifier, preferring `_id`, when the reference was
    /// populated with one.
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Name(_) => None,
            Self::Ref { object_id, id, .. } => object_id.as_ref().or(id.as_ref()),
        }
    }
}

/// Joins reference names with `", "`, or returns `None` for an empty list.
pub fn join_names(refs: &[NamedRef]) -> Option<String> {
    if refs.is_empty() {
        return None;
    }
    Some(refs.iter().map(NamedRef::name).collect::<Vec<_>>().join(", "))
}

/// The user account linked to a staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Document-store identifier of the user account.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Login name.
    #[serde(default)]
    pub username: String,
}

impl UserRef {
    /// Returns the account identifier, preferring `_id`.
    pub fn record_id(&self) -> Option<&RecordId> {
        self.object_id.as_ref().or(self.id.as_ref())
    }
}

/// The `userId` field of a staff record.
///
/// Holds the account object when the relation was populated and only its
/// identifier otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserLink {
    User(UserRef),
    Id(RecordId),
}

impl UserLink {
    /// Returns the login name, which only a populated link carries.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::User(user) => Some(user.username.as_str()).filter(|u| !u.is_empty()),
            Self::Id(_) => None,
        }
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            Self::User(user) => user.record_id(),
            Self::Id(id) => Some(id),
        }
    }
}
