//! School admin list pages
//!
//! A front-end independent client for the students and teachers lists of a
//! school-management dashboard: query state mirrored into the page URL,
//! debounced search, envelope-tolerant fetching, and table / pagination view
//! models.

pub mod api;
pub mod error;
pub mod model;
pub mod page;
pub mod session;
pub mod view;

mod client;

pub use client::*;
