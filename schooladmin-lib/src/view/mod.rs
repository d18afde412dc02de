//! Front-end independent view models.
//!
//! Pages produce these; a front end (terminal, web, ...) only draws them and
//! routes clicks back through the callbacks they expose.

mod actions;
mod filter;
mod pagination;
mod table;

pub use actions::*;
pub use filter::*;
pub use pagination::*;
pub use table::*;
