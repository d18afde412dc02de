//! How each record kind is listed.

use serde::de::DeserializeOwned;

use crate::api::Resource;
use crate::model::Student;
use crate::model::Teacher;
use crate::model::types::join_names;
use crate::session::Session;
use crate::view::Breakpoint;
use crate::view::Cell;
use crate::view::Column;
use crate::view::Row;
use crate::view::row_actions;

/// A record kind with its own list page.
pub trait ListRecord: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the records come from.
    const RESOURCE: Resource;

    /// Table columns in display order.
    fn columns() -> Vec<Column>;

    /// Renders the record as one table row, matching [`columns`](Self::columns).
    fn render_row(&self, session: &Session) -> Row;
}

fn keyed(row: Row, key: Option<String>) -> Row {
    match key {
        Some(key) => row.with_key(key),
        None => row,
    }
}

impl ListRecord for Student {
    const RESOURCE: Resource = Resource::Students;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Info", "info").sortable("name"),
            Column::new("Student ID", "studentId")
                .sortable("username")
                .visible_from(Breakpoint::Medium),
            Column::new("Grade", "grade")
                .sortable("grade")
                .visible_from(Breakpoint::Medium),
            Column::new("Phone", "phone")
                .sortable("phone")
                .visible_from(Breakpoint::Large),
            Column::new("Address", "address")
                .sortable("address")
                .visible_from(Breakpoint::Large),
            Column::new("Actions", "action"),
        ]
    }

    fn render_row(&self, session: &Session) -> Row {
        let id = self.record_id();
        let classes = join_names(&self.classes).unwrap_or_else(|| "No classes".to_string());
        let grade = self
            .grade
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        let row = Row::new(vec![
            Cell::with_detail(&self.name, classes),
            Cell::text(&self.username),
            Cell::text(grade),
            Cell::text(&self.phone),
            Cell::text(&self.address),
            Cell::Actions(row_actions(Self::RESOURCE, id.as_ref(), session)),
        ]);
        keyed(row, id.map(|id| id.to_string()))
    }
}

impl ListRecord for Teacher {
    const RESOURCE: Resource = Resource::Teachers;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Info", "info").sortable("name"),
            Column::new("Teacher ID", "teacherId").visible_from(Breakpoint::Medium),
            Column::new("Subjects", "subjects").visible_from(Breakpoint::Medium),
            Column::new("Classes", "classes").visible_from(Breakpoint::Medium),
            Column::new("Phone", "phone")
                .sortable("phone")
                .visible_from(Breakpoint::Large),
            Column::new("Address", "address")
                .sortable("address")
                .visible_from(Breakpoint::Large),
            Column::new("Actions", "action"),
        ]
    }

    fn render_row(&self, session: &Session) -> Row {
        let id = self.record_id();
        let name = self.full_name();
        let info = match self.email.as_deref().filter(|e| !e.is_empty()) {
            Some(email) => Cell::with_detail(name, email),
            None => Cell::text(name),
        };
        let row = Row::new(vec![
            info,
            Cell::text(self.username().unwrap_or("-")),
            Cell::text(join_names(&self.subjects).unwrap_or_else(|| "No subjects".to_string())),
            Cell::text(join_names(&self.classes).unwrap_or_else(|| "No classes assigned".to_string())),
            Cell::text(&self.phone),
            Cell::text(&self.address),
            Cell::Actions(row_actions(Self::RESOURCE, id.as_ref(), session)),
        ]);
        keyed(row, id.map(|id| id.to_string()))
    }
}
