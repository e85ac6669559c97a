//! Convenient re-exports of commonly used types from docrest.
//!
//! ```ignore
//! use docrest::prelude::*;
//! ```

pub use docrest_core::{
    adapter::RestAdapter,
    config::{RestConfig, RestConfigBuilder},
    error::{InterceptorError, InterceptorResult, RestError, RestResult, StoreError, StoreResult},
    http::{FlashKind, ResourceRequest, ResourceResponse},
    interceptor::{Interceptor, InterceptorContext, InterceptorRegistry, event, from_fn},
    model::{ListQuery, ResourceModel, Sort, SortDirection},
};
