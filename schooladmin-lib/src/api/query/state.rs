//! Per-page query state.

use super::SortSpec;

/// The page, sort, search, and class filter a list view currently shows.
///
/// Empty `search` and `class` mean "no constraint". Changing anything other
/// than the page sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    sort: SortSpec,
    search: String,
    class: String,
    /// Unrelated URL parameters, kept so URL sync does not drop them.
    pub(crate) extra: Vec<(String, String)>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            sort: SortSpec::default(),
            search: String::new(),
            class: String::new(),
            extra: Vec::new(),
        }
    }
}

impl QueryState {
    /// Creates the default state: page 1, sorted by name ascending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page, builder style. Values below 1 become 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the sort, builder style.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the search text, builder style.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the class filter, builder style.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Returns the search text, or `None` when empty.
    pub fn search(&self) -> Option<&str> {
        Some(self.search.as_str()).filter(|s| !s.is_empty())
    }

    /// Returns the selected class id, or `None` when empty.
    pub fn class(&self) -> Option<&str> {
        Some(self.class.as_str()).filter(|s| !s.is_empty())
    }

    /// Moves to a page. Returns `true` if the state changed.
    ///
    /// No upper bound is applied; a page past the end yields an empty list.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// Sets the search text. Returns `true` if the state changed.
    pub fn set_search(&mut self, search: &str) -> bool {
        if self.search == search {
            return false;
        }
        self.search = search.to_string();
        self.page = 1;
        true
    }

    /// Selects a class, or clears the filter with an empty id.
    /// Returns `true` if the state changed.
    pub fn set_class(&mut self, class: &str) -> bool {
        if self.class == class {
            return false;
        }
        self.class = class.to_string();
        self.page = 1;
        true
    }

    /// Applies a column-header click on `field`.
    pub fn sort_by(&mut self, field: &str) {
        self.sort.toggle(field);
        self.page = 1;
    }
}
