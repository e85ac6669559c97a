//! The document store seam of the adapter.
//!
//! A [`ResourceModel`] is the per-resource handle the handlers use to list, create, load,
//! persist, and remove documents. The adapter never looks inside a document; it only moves
//! it between the model, the interceptors, and the response.
//!
//! # Example
//!
//! ```ignore
//! use docrest::{memory::InMemoryModel, model::{ListQuery, ResourceModel, SortDirection}};
//!
//! let users = InMemoryModel::builder("user").build();
//! let mut alice = users.create(serde_json::json!({ "name": "Alice" }))?;
//! users.save(&mut alice).await?;
//!
//! let listed = users
//!     .find(ListQuery::new().sort("name", SortDirection::Asc))
//!     .await?;
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::error::StoreResult;

/// Sort direction for listed documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

/// Sort specification for listed documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// The query issued by a collection listing.
///
/// Filtering is left to the model; the adapter only asks for an optional ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort: Option<Sort>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }
}

/// Abstract interface for the document store behind one resource.
///
/// Implementations must be thread-safe; the adapter shares one model between all
/// requests for its resource.
#[async_trait]
pub trait ResourceModel<D: Send + Sync + 'static>: Send + Sync + Debug {
    /// Fetches the documents of the collection.
    async fn find(&self, query: ListQuery) -> StoreResult<Vec<D>>;

    /// Fetches a single document by its identifier, `None` when no such document exists.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<D>>;

    /// Builds a new, not yet persisted document populated from submitted values.
    fn create(&self, values: Value) -> StoreResult<D>;

    /// Overwrites the fields of `doc` with submitted values.
    fn apply(&self, doc: &mut D, values: Value) -> StoreResult<()>;

    /// Persists `doc`, inserting it on first save.
    ///
    /// Implementations may assign an identifier to `doc` here.
    async fn save(&self, doc: &mut D) -> StoreResult<()>;

    /// Removes a persisted document.
    async fn remove(&self, doc: &D) -> StoreResult<()>;
}
