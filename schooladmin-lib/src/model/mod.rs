//! Record models
//!
//! These are view-model projections of backend records. Every field except
//! the display name is optional or defaulted so that partially populated
//! records still render.

mod class;
mod de;
mod student;
mod teacher;
pub mod types;

pub use class::*;
pub use student::*;
pub use teacher::*;
