//! Main docrest crate: document store collections served as REST resources.
//!
//! This crate re-exports the core handlers and traits and provides the in-memory model.
//! The host web framework supplies the routing; for each route it adapts its request and
//! response to [`ResourceRequest`](http::ResourceRequest) and
//! [`ResourceResponse`](http::ResourceResponse) and calls the matching handler:
//!
//! | Route | Handler |
//! |---|---|
//! | `GET <url_path>:resource` | [`RestAdapter::collection_get`](adapter::RestAdapter::collection_get) |
//! | `POST <url_path>:resource` | [`RestAdapter::collection_post`](adapter::RestAdapter::collection_post) |
//! | `GET <url_path>:resource/:id` | [`RestAdapter::entity_get`](adapter::RestAdapter::entity_get) |
//! | `PUT <url_path>:resource/:id` | [`RestAdapter::entity_put`](adapter::RestAdapter::entity_put) |
//! | `DELETE <url_path>:resource/:id` | [`RestAdapter::entity_delete`](adapter::RestAdapter::entity_delete) |
//!
//! # Quick Start
//!
//! ```ignore
//! use docrest::{prelude::*, memory::InMemoryModel, async_trait};
//! use docrest::bson::Document;
//!
//! struct StampCreator;
//!
//! #[async_trait]
//! impl Interceptor<Document> for StampCreator {
//!     async fn intercept(&self, ctx: InterceptorContext<'_, Document>) -> InterceptorResult {
//!         ctx.doc.insert("createdBy", "api");
//!         Ok(())
//!     }
//! }
//!
//! let mut adapter = RestAdapter::new(
//!     RestConfig::builder()
//!         .view_path("views/")
//!         .enable_xhr(true)
//!         .build(),
//! );
//!
//! adapter
//!     .add_resource("user", InMemoryModel::builder("user").build())
//!     .add_interceptor("user", event::POST, StampCreator)
//!     .add_interceptor("user", event::POST_ERROR, from_fn(|ctx: InterceptorContext<'_, Document>| {
//!         tracing::warn!(resource = ctx.resource, "user was not created");
//!         Ok(())
//!     }));
//!
//! // Inside a route handler:
//! adapter.collection_post(&mut request, &mut response).await?;
//! ```

pub mod prelude;

pub use docrest_core::{adapter, config, error, http, interceptor, model};

// Re-exported for implementing interceptors and models
pub use async_trait::async_trait;
pub use bson;
pub use serde_json;

/// In-memory resource models.
pub mod memory {
    pub use docrest_memory::{ID_FIELD, InMemoryModel, InMemoryModelBuilder};
}
