//! Role-dependent row and page actions.
//!
//! These only describe the buttons; forms and confirmation dialogs belong to
//! the front end.

use crate::api::Resource;
use crate::model::types::RecordId;
use crate::session::Session;

/// An action offered on a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Open the record's detail page.
    View { href: String },
    /// Open the delete form for the record.
    Delete { table: &'static str, id: String },
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::View { .. } => "View",
            Self::Delete { .. } => "Delete",
        }
    }
}

/// An action offered in the page toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Open the create form.
    Create { table: &'static str },
}

/// Actions for one row. Records without an id get none.
pub fn row_actions(resource: Resource, id: Option<&RecordId>, session: &Session) -> Vec<RowAction> {
    let Some(id) = id else {
        return Vec::new();
    };
    let mut actions = vec![RowAction::View {
        href: format!("{}/{}", resource.list_path(), id),
    }];
    if session.can_manage() {
        actions.push(RowAction::Delete {
            table: resource.singular(),
            id: id.to_string(),
        });
    }
    actions
}

/// Toolbar actions of a list page.
pub fn page_actions(resource: Resource, session: &Session) -> Vec<PageAction> {
    if session.can_manage() {
        vec![PageAction::Create {
            table: resource.singular(),
        }]
    } else {
        Vec::new()
    }
}
