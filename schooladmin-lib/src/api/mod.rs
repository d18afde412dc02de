//! Backend API types: collection requests, envelopes, and query state.

mod envelope;
mod list;
pub mod query;

pub use envelope::*;
pub use list::*;
