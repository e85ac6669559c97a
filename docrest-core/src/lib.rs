//! Expose document store collections as REST resources with CRUD lifecycle interceptors.
//!
//! This crate is the core of the docrest project and provides:
//!
//! - **Request handlers** ([`adapter`]) - Collection and entity handlers plus their renderers
//! - **Interceptors** ([`interceptor`]) - Registry and sequential runner for lifecycle events
//! - **Model abstraction** ([`model`]) - The trait a document store implements per resource
//! - **Framework seam** ([`http`]) - Request and response traits the host framework implements
//! - **Configuration** ([`config`]) - View naming, XHR handling, and URL settings
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docrest_core::{adapter::RestAdapter, config::RestConfig, interceptor::event};
//!
//! let mut adapter = RestAdapter::new(RestConfig::default());
//! adapter
//!     .add_resource("user", users)
//!     .add_interceptor("user", event::GET, HidePasswords);
//!
//! adapter.collection_get(&request, &mut response).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrest_core;

pub mod adapter;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod model;
