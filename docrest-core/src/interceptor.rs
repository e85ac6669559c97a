//! Lifecycle interceptors and the sequential runner that dispatches them.
//!
//! An [`Interceptor`] is bound to a `(resource, event)` pair through an
//! [`InterceptorRegistry`]. When a handler reaches that lifecycle point for a document it
//! calls [`InterceptorRegistry::run`], which awaits every interceptor registered for the
//! pair in registration order, one at a time, and stops at the first failure.
//!
//! # Example
//!
//! ```ignore
//! use docrest::interceptor::{event, from_fn, InterceptorRegistry};
//!
//! let mut registry = InterceptorRegistry::<serde_json::Value>::new();
//! registry.add("user", event::POST, from_fn(|ctx| {
//!     ctx.doc["createdBy"] = "api".into();
//!     Ok(())
//! }));
//!
//! registry.run("user", event::POST, &mut doc).await?;
//! ```

use async_trait::async_trait;
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::debug;

use crate::error::InterceptorResult;

/// Event names dispatched by the built-in handlers.
///
/// Events are plain strings; applications may run their own through
/// [`InterceptorRegistry::run`].
pub mod event {
    pub const GET: &str = "get";
    pub const POST: &str = "post";
    pub const POST_SUCCESS: &str = "post.success";
    pub const POST_ERROR: &str = "post.error";
    pub const PUT: &str = "put";
    pub const PUT_SUCCESS: &str = "put.success";
    pub const PUT_ERROR: &str = "put.error";
    pub const DELETE: &str = "delete";
    pub const DELETE_SUCCESS: &str = "delete.success";
    pub const DELETE_ERROR: &str = "delete.error";
}

/// What an interceptor is handed: the document plus where in the lifecycle it is.
#[derive(Debug)]
pub struct InterceptorContext<'a, D> {
    pub resource: &'a str,
    pub event: &'a str,
    pub doc: &'a mut D,
}

/// A callback run at a named lifecycle point of a resource.
///
/// Completion of the returned future is the completion signal. Returning an error stops
/// the chain it runs in.
#[async_trait]
pub trait Interceptor<D>: Send + Sync {
    async fn intercept(&self, ctx: InterceptorContext<'_, D>) -> InterceptorResult;
}

#[async_trait]
impl<D, I> Interceptor<D> for Arc<I>
where
    D: Send + Sync,
    I: Interceptor<D> + ?Sized,
{
    async fn intercept(&self, ctx: InterceptorContext<'_, D>) -> InterceptorResult {
        (**self).intercept(ctx).await
    }
}

/// An interceptor that completes synchronously, built with [`from_fn`].
pub struct FnInterceptor<F> {
    f: F,
}

/// Wraps a synchronous closure as an [`Interceptor`].
pub fn from_fn<D, F>(f: F) -> FnInterceptor<F>
where
    D: Send + Sync,
    F: Fn(InterceptorContext<'_, D>) -> InterceptorResult + Send + Sync,
{
    FnInterceptor { f }
}

#[async_trait]
impl<D, F> Interceptor<D> for FnInterceptor<F>
where
    D: Send + Sync,
    F: Fn(InterceptorContext<'_, D>) -> InterceptorResult + Send + Sync,
{
    async fn intercept(&self, ctx: InterceptorContext<'_, D>) -> InterceptorResult {
        (self.f)(ctx)
    }
}

type EventMap<D> = HashMap<String, Vec<Box<dyn Interceptor<D>>>>;

/// Ordered interceptor lists keyed by resource name, then event name.
///
/// Registration needs `&mut self`, so a registry that is being served from is never
/// mutated and needs no lock.
pub struct InterceptorRegistry<D> {
    resources: HashMap<String, EventMap<D>>,
}

impl<D> Default for InterceptorRegistry<D> {
    fn default() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }
}

impl<D: Send + Sync> InterceptorRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `interceptor` to the list for `(resource, event)`.
    ///
    /// The same interceptor may be added more than once; it then runs once per addition.
    pub fn add(
        &mut self,
        resource: impl Into<String>,
        event: impl Into<String>,
        interceptor: impl Interceptor<D> + 'static,
    ) -> &mut Self {
        self.resources
            .entry(resource.into())
            .or_default()
            .entry(event.into())
            .or_default()
            .push(Box::new(interceptor));
        self
    }

    /// The interceptors registered for `(resource, event)`, in registration order.
    pub fn get(&self, resource: &str, event: &str) -> &[Box<dyn Interceptor<D>>] {
        self.resources
            .get(resource)
            .and_then(|events| events.get(event))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn count(&self, resource: &str, event: &str) -> usize {
        self.get(resource, event).len()
    }

    /// Runs the `(resource, event)` chain against `doc`.
    ///
    /// Each interceptor starts only after the previous one completed. The first error is
    /// returned and the remaining interceptors are skipped. With nothing registered this
    /// returns `Ok(())` without suspending.
    pub async fn run(&self, resource: &str, event: &str, doc: &mut D) -> InterceptorResult {
        for (index, interceptor) in self.get(resource, event).iter().enumerate() {
            debug!(resource, event, index, "running interceptor");

            interceptor
                .intercept(InterceptorContext {
                    resource,
                    event,
                    doc: &mut *doc,
                })
                .await?;
        }

        Ok(())
    }

    /// Runs the `(resource, event)` chain against every document in turn.
    ///
    /// The chain for one document completes before the chain for the next one starts.
    pub async fn run_each(&self, resource: &str, event: &str, docs: &mut [D]) -> InterceptorResult {
        if self.get(resource, event).is_empty() {
            return Ok(());
        }

        for doc in docs.iter_mut() {
            self.run(resource, event, doc).await?;
        }

        Ok(())
    }
}

impl<D> fmt::Debug for InterceptorRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();

        for (resource, events) in &self.resources {
            for (event, interceptors) in events {
                map.entry(&format!("{resource}:{event}"), &interceptors.len());
            }
        }

        map.finish()
    }
}
