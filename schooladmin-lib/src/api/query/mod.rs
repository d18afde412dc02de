//! Query state for list views.
//!
//! - [`QueryState`] - page, sort, search, and class filter of one list view
//! - [`SortSpec`] / [`Direction`] - the `field:direction` sort descriptor
//! - [`url`] - parsing and serializing the state as a URL query string

mod order;
mod state;
pub mod url;

pub use order::DEFAULT_SORT_FIELD;
pub use order::Direction;
pub use order::SortSpec;
pub use state::QueryState;
