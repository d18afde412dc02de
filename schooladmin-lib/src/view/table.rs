//! Column-driven table view model.
//!
//! The table does not know what it lists: callers describe the columns and
//! supply a function turning one record into a [`Row`].
//!
//! # Example
//!
//! ```
//! use schooladmin_lib::view::{Cell, Column, Row, TableView};
//!
//! let columns = vec![
//!     Column::new("Name", "name").sortable("name"),
//!     Column::new("Phone", "phone"),
//! ];
//! let people = vec![("Ann", "555-0101"), ("Bo", "555-0102")];
//! let table = TableView::render(&columns, &people, |(name, phone)| {
//!     Row::new(vec![Cell::text(*name), Cell::text(*phone)])
//! }, None);
//!
//! assert_eq!(table.headers.len(), 2);
//! assert_eq!(table.rows.len(), 2);
//! ```

use super::RowAction;
use crate::api::query::Direction;
use crate::api::query::SortSpec;

/// Screen width below which a column is hidden. Ordered narrow to wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Breakpoint {
    /// Always shown.
    #[default]
    Always,
    /// Hidden on narrow screens.
    Medium,
    /// Hidden on narrow and medium screens.
    Large,
}

/// Column configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column header text.
    pub header: String,
    /// Stable key of the column.
    pub accessor: String,
    /// Field sent to the backend when the header is clicked. Columns without
    /// one are not sortable.
    pub sort_key: Option<String>,
    /// When the column is shown.
    pub visible_from: Breakpoint,
}

impl Column {
    pub fn new(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: accessor.into(),
            sort_key: None,
            visible_from: Breakpoint::Always,
        }
    }

    /// Makes the column sortable on `key`.
    pub fn sortable(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    /// Hides the column below `breakpoint`.
    pub fn visible_from(mut self, breakpoint: Breakpoint) -> Self {
        self.visible_from = breakpoint;
        self
    }
}

/// Contents of one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Text with an optional second, muted line.
    Text { text: String, detail: Option<String> },
    /// Row action buttons.
    Actions(Vec<RowAction>),
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            detail: None,
        }
    }

    pub fn with_detail(text: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            detail: Some(detail.into()),
        }
    }

    /// Returns the main text, or an empty string for action cells.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text, .. } => text,
            Self::Actions(_) => "",
        }
    }
}

/// One rendered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Stable key of the record, when it has an id.
    pub key: Option<String>,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { key: None, cells }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// A rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub header: String,
    pub accessor: String,
    pub sort_key: Option<String>,
    /// Direction indicator, set on the column the list is sorted by.
    pub sorted: Option<Direction>,
    pub visible_from: Breakpoint,
}

impl HeaderCell {
    pub fn is_sortable(&self) -> bool {
        self.sort_key.is_some()
    }

    /// Handles a click: calls `on_sort` with the sort key if the column has
    /// one. Returns `true` if the callback ran.
    pub fn click(&self, on_sort: impl FnOnce(&str)) -> bool {
        match &self.sort_key {
            Some(key) => {
                on_sort(key);
                true
            }
            None => false,
        }
    }
}

/// A rendered table: one header cell per column, one row per record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Row>,
}

impl TableView {
    /// Renders `data` in column order using `render_row`.
    ///
    /// `sort` marks the header whose sort key matches the active field.
    pub fn render<R>(
        columns: &[Column],
        data: &[R],
        render_row: impl Fn(&R) -> Row,
        sort: Option<&SortSpec>,
    ) -> Self {
        let headers = columns
            .iter()
            .map(|col| HeaderCell {
                header: col.header.clone(),
                accessor: col.accessor.clone(),
                sort_key: col.sort_key.clone(),
                sorted: sort
                    .filter(|s| col.sort_key.as_deref() == Some(s.field()))
                    .map(SortSpec::direction),
                visible_from: col.visible_from,
            })
            .collect();
        let rows = data.iter().map(render_row).collect();
        Self { headers, rows }
    }

    /// Clicks the header at `index`. Returns `true` if `on_sort` ran.
    pub fn click_header(&self, index: usize, on_sort: impl FnOnce(&str)) -> bool {
        self.headers
            .get(index)
            .is_some_and(|header| header.click(on_sort))
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Info", "info").sortable("name"),
            Column::new("Phone", "phone").sortable("phone").visible_from(Breakpoint::Large),
            Column::new("Actions", "action"),
        ]
    }

    #[test]
    fn test_header_order_and_rows() {
        let data = vec!["a", "b", "c"];
        let table = TableView::render(&columns(), &data, |s| Row::new(vec![Cell::text(*s)]), None);
        let headers: Vec<_> = table.headers.iter().map(|h| h.header.as_str()).collect();
        assert_eq!(headers, vec!["Info", "Phone", "Actions"]);
        let rows: Vec<_> = table.rows.iter().map(|r| r.cells[0].as_text()).collect();
        assert_eq!(rows, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_click_sortable_header() {
        let table = TableView::render::<()>(&columns(), &[], |_| Row::new(vec![]), None);
        let mut clicked = None;
        assert!(table.click_header(1, |key| clicked = Some(key.to_string())));
        assert_eq!(clicked.as_deref(), Some("phone"));
    }

    #[test]
    fn test_click_plain_header_does_nothing() {
        let table = TableView::render::<()>(&columns(), &[], |_| Row::new(vec![]), None);
        let mut called = false;
        assert!(!table.click_header(2, |_| called = true));
        assert!(!table.click_header(9, |_| called = true));
        assert!(!called);
    }

    #[test]
    fn test_sorted_indicator() {
        let sort = SortSpec::desc("phone");
        let table = TableView::render::<()>(&columns(), &[], |_| Row::new(vec![]), Some(&sort));
        assert_eq!(table.headers[0].sorted, None);
        assert_eq!(table.headers[1].sorted, Some(Direction::Desc));
        assert_eq!(table.headers[2].sorted, None);
    }
}
