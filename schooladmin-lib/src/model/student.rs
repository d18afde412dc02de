//! Student records

use serde::Deserialize;
use serde::Serialize;

use super::de::null_as_default;
use super::types::NamedRef;
use super::types::RecordId;
use super::types::Scalar;

/// A student as listed on the students page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Document-store identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Numeric identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Full name.
    pub name: String,
    /// Login name, shown in the "Student ID" column.
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<NamedRef>,
}

impl Student {
    /// Creates a student with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            object_id: None,
            id: None,
            name: name.into(),
            username: String::new(),
            grade: None,
            email: None,
            phone: String::new(),
            address: String::new(),
            subjects: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Returns the identifier, preferring the document-store one.
    pub fn record_id(&self) -> Option<RecordId> {
        self.object_id
            .clone()
            .map(RecordId::Text)
            .or_else(|| self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populated_student() {
        let student: Student = serde_json::from_str(
            r#"{
                "_id": "65f1",
                "name": "Ann Lee",
                "username": "alee",
                "grade": 5,
                "phone": "555-0101",
                "address": "1 Elm St",
                "subjects": [{"_id": "s1", "name": "Math"}],
                "classes": ["5A"]
            }"#,
        )
        .unwrap();
        assert_eq!(student.record_id(), Some(RecordId::Text("65f1".into())));
        assert_eq!(student.grade, Some(Scalar::Int(5)));
        assert_eq!(student.subjects[0].name(), "Math");
        assert_eq!(student.classes[0].name(), "5A");
    }

    #[test]
    fn test_sparse_student() {
        let student: Student =
            serde_json::from_str(r#"{"id": 4, "name": "Bo", "classes": null, "grade": "K"}"#).unwrap();
        assert_eq!(student.record_id(), Some(RecordId::Number(4)));
        assert!(student.classes.is_empty());
        assert_eq!(student.grade.map(|g| g.to_string()).as_deref(), Some("K"));
        assert_eq!(student.phone, "");
    }
}
