//! List requests and results for the collection endpoints.

use std::fmt;

use crate::api::query::QueryState;
use crate::api::query::SortSpec;

/// Path segment of the class collection.
pub const CLASSES_PATH: &str = "classes";

/// A paginated collection the dashboard lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Students,
    Teachers,
}

impl Resource {
    /// Path segment under the API prefix.
    pub fn path(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Teachers => "teachers",
        }
    }

    /// Fixed number of rows per page.
    pub fn page_size(self) -> u32 {
        match self {
            Self::Students => 10,
            Self::Teachers => 6,
        }
    }

    /// Request parameter carrying the class filter.
    pub fn class_param(self) -> &'static str {
        match self {
            Self::Students => "classes",
            Self::Teachers => "classId",
        }
    }

    /// Dashboard path of the list page.
    pub fn list_path(self) -> &'static str {
        match self {
            Self::Students => "/list/students",
            Self::Teachers => "/list/teachers",
        }
    }

    /// Singular name, used for action targets.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Students => "student",
            Self::Teachers => "teacher",
        }
    }

    /// Page heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Students => "All Students",
            Self::Teachers => "All Teachers",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Number of pages needed for `total` records, never less than 1.
///
/// # Example
///
/// ```
/// use schooladmin_lib::api::total_pages;
///
/// assert_eq!(total_pages(0, 10), 1);
/// assert_eq!(total_pages(10, 10), 1);
/// assert_eq!(total_pages(11, 10), 2);
/// ```
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// A request for one page of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub resource: Resource,
    pub page: u32,
    pub limit: u32,
    pub sort: SortSpec,
    pub search: Option<String>,
    pub class: Option<String>,
}

impl ListRequest {
    /// Builds the request for the current state of a list view.
    pub fn from_state(resource: Resource, state: &QueryState) -> Self {
        Self {
            resource,
            page: state.page(),
            limit: resource.page_size(),
            sort: state.sort().clone(),
            search: state.search().map(str::to_string),
            class: state.class().map(str::to_string),
        }
    }

    /// Query parameters in request order; empty filters are left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort", self.sort.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(class) = self.class.as_deref().filter(|s| !s.is_empty()) {
            pairs.push((self.resource.class_param(), class.to_string()));
        }
        pairs
    }
}

/// One page of records with pagination info.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<R> {
    records: Vec<R>,
    page: u32,
    total: u64,
    total_pages: u32,
}

impl<R> ListResult<R> {
    /// Creates a result, deriving the page count from `total` and `page_size`.
    pub fn new(records: Vec<R>, page: u32, total: u64, page_size: u32) -> Self {
        Self {
            records,
            page,
            total,
            total_pages: total_pages(total, page_size),
        }
    }

    /// Returns the records on this page.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Consumes the result and returns the records.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Page number this result was requested for.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total records across all pages (declared, or this page's length).
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
