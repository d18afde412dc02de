//! Data sources a list page fetches from.
//!
//! [`SchoolClient`](crate::SchoolClient) implements both traits; tests and
//! alternative front ends can plug in their own.

use async_trait::async_trait;

use super::ListRecord;
use crate::api::ListRequest;
use crate::api::ListResult;
use crate::error::Error;
use crate::model::ClassRef;

/// Source of paginated records.
#[async_trait]
pub trait RecordSource<R: ListRecord>: Send + Sync {
    /// Fetches the page described by `request`.
    async fn fetch_page(&self, request: &ListRequest) -> Result<ListResult<R>, Error>;
}

/// Source of the class list used by the filter dropdown.
#[async_trait]
pub trait ClassSource: Send + Sync {
    async fn fetch_classes(&self) -> Result<Vec<ClassRef>, Error>;
}
