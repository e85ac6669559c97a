//! In-memory resource models for docrest.
//!
//! This crate provides [`InMemoryModel`], a thread-safe, in-memory implementation of the
//! `ResourceModel` trait over BSON documents. It uses async-aware read-write locks and is
//! meant for development, testing, and small deployments.
//!
//! # Quick Start
//!
//! ```ignore
//! use docrest::{prelude::*, memory::InMemoryModel};
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let users = InMemoryModel::builder("user")
//!         .document(doc! { "name": "Alice" })
//!         .build();
//!
//!     let mut adapter = RestAdapter::new(RestConfig::default());
//!     adapter.add_resource("user", users.clone());
//!
//!     let listed = users.find(ListQuery::new()).await.unwrap();
//!     assert_eq!(listed.len(), 1);
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrest_memory;

pub mod model;

pub use model::{InMemoryModel, InMemoryModelBuilder, ID_FIELD};
