//! Query state <-> URL query string.
//!
//! The page URL is the only persisted state of a list view, so a shared link
//! must reproduce the same view. Keys: `page`, `sort`, `search`, `class`.

use url::form_urlencoded;

use super::QueryState;
use super::SortSpec;

const PAGE: &str = "page";
const SORT: &str = "sort";
const SEARCH: &str = "search";
const CLASS: &str = "class";
/// Older links from the teachers page filtered with `classId`.
const LEGACY_CLASS: &str = "classId";

/// Parses a URL query string (with or without the leading `?`) into state.
///
/// Never fails: malformed values fall back to their defaults.
pub fn parse_query(query: &str) -> QueryState {
    let query = query.trim_start_matches('?');
    let mut state = QueryState::default();
    let mut legacy_class = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PAGE => match value.trim().parse::<u32>() {
                Ok(page) if page >= 1 => state = state.with_page(page),
                _ => log::debug!("ignoring invalid page '{}'", value),
            },
            SORT => state = state.with_sort(SortSpec::parse_lenient(&value)),
            SEARCH => state = state.with_search(value.into_owned()),
            CLASS => state = state.with_class(value.into_owned()),
            LEGACY_CLASS => legacy_class = Some(value.into_owned()),
            _ => state.extra.push((key.into_owned(), value.into_owned())),
        }
    }

    if let Some(class) = legacy_class.filter(|_| state.class().is_none()) {
        state = state.with_class(class);
    }

    state
}

/// Serializes state into a query string without the leading `?`.
///
/// Empty search and class are omitted; unrelated keys seen while parsing are
/// appended unchanged.
pub fn to_query(state: &QueryState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(PAGE, &state.page().to_string());
    serializer.append_pair(SORT, &state.sort().to_string());
    if let Some(search) = state.search() {
        serializer.append_pair(SEARCH, search);
    }
    if let Some(class) = state.class() {
        serializer.append_pair(CLASS, class);
    }
    for (key, value) in &state.extra {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Joins a path and the serialized state into a navigable URL.
pub fn to_url(path: &str, state: &QueryState) -> String {
    let query = to_query(state);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
