//! Shared field types

mod id;
mod named_ref;
mod scalar;

pub use id::*;
pub use named_ref::*;
pub use scalar::*;
