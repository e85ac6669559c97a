//! Request handlers exposing registered models as REST resources.
//!
//! [`RestAdapter`] holds the configuration, the resource models, and the interceptor
//! registry. Everything is registered up front through `&mut self`; serving only needs
//! `&self`, so one adapter can be shared behind an `Arc` by every request.
//!
//! | Handler | Events | Finishes with |
//! |---|---|---|
//! | [`collection_get`](RestAdapter::collection_get) | `get` per document | [`render_collection`](RestAdapter::render_collection) |
//! | [`collection_post`](RestAdapter::collection_post) | `post`, then `post.success` or `post.error` | redirect to the collection |
//! | [`entity_get`](RestAdapter::entity_get) | `get` | [`render_entity`](RestAdapter::render_entity) |
//! | [`entity_put`](RestAdapter::entity_put) | `put`, then `put.success` or `put.error` | redirect to the document |
//! | [`entity_delete`](RestAdapter::entity_delete) | `delete`, then `delete.success` or `delete.error` | redirect to the collection |
//!
//! Failures while reading (unknown resource, missing document, store or interceptor errors
//! while listing) are returned to the caller for the host framework's error path. Failures
//! while writing, including submissions that cannot form a document, are turned into a
//! single `error` flash message and still redirect.
//!
//! # Example
//!
//! ```ignore
//! use docrest::{prelude::*, memory::InMemoryModel};
//!
//! let mut adapter = RestAdapter::new(RestConfig::builder().enable_xhr(true).build());
//! adapter
//!     .add_resource("user", InMemoryModel::builder("user").build())
//!     .add_interceptor("user", event::POST, from_fn(|ctx| {
//!         ctx.doc.insert("source", "api");
//!         Ok(())
//!     }));
//!
//! adapter.collection_post(&mut request, &mut response).await?;
//! ```

use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::{
    config::RestConfig,
    error::{InterceptorResult, RestError, RestResult, StoreError},
    http::{FlashKind, NEW_RESOURCE_FIELD, RESOURCE_FIELD, ResourceRequest, ResourceResponse},
    interceptor::{Interceptor, InterceptorRegistry, event},
    model::ResourceModel,
};

/// Where a write ends up: which events follow it and where the client is sent.
struct Settlement<'a> {
    resource: &'a str,
    success: &'static str,
    failure: &'static str,
    redirect: String,
}

/// Exposes document-store models as REST resources.
#[derive(Debug)]
pub struct RestAdapter<D: Send + Sync + 'static> {
    config: RestConfig,
    models: HashMap<String, Box<dyn ResourceModel<D>>>,
    interceptors: InterceptorRegistry<D>,
}

impl<D> RestAdapter<D>
where
    D: Serialize + Send + Sync + 'static,
{
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            models: HashMap::new(),
            interceptors: InterceptorRegistry::new(),
        }
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    pub fn interceptors(&self) -> &InterceptorRegistry<D> {
        &self.interceptors
    }

    /// Serves `model` under the resource name `name`, replacing any previous model.
    pub fn add_resource(
        &mut self,
        name: impl Into<String>,
        model: impl ResourceModel<D> + 'static,
    ) -> &mut Self {
        self.models.insert(name.into(), Box::new(model));
        self
    }

    /// Appends `interceptor` to the `(resource, event)` chain.
    pub fn add_interceptor(
        &mut self,
        resource: impl Into<String>,
        event: impl Into<String>,
        interceptor: impl Interceptor<D> + 'static,
    ) -> &mut Self {
        self.interceptors.add(resource, event, interceptor);
        self
    }

    /// Runs the `(resource, event)` chain against `doc`. See [`InterceptorRegistry::run`].
    pub async fn run_interceptors(
        &self,
        resource: &str,
        event: &str,
        doc: &mut D,
    ) -> InterceptorResult {
        self.interceptors.run(resource, event, doc).await
    }

    fn model(&self, resource: &str) -> RestResult<&dyn ResourceModel<D>> {
        self.models
            .get(resource)
            .map(|model| model.as_ref())
            .ok_or_else(|| RestError::ResourceNotFound(resource.to_string()))
    }

    /// Lists a collection.
    ///
    /// Every fetched document goes through the `get` chain, one document after the other,
    /// before the whole set is handed to [`render_collection`](Self::render_collection).
    pub async fn collection_get<Req, Res>(&self, req: &Req, res: &mut Res) -> RestResult<()>
    where
        Req: ResourceRequest,
        Res: ResourceResponse,
    {
        let resource = req.resource();
        let model = self.model(resource)?;

        let mut docs = model.find(self.config.list_query()).await?;
        debug!(resource, count = docs.len(), "fetched collection");

        self.interceptors
            .run_each(resource, event::GET, &mut docs)
            .await?;

        self.render_collection(&docs, req, res)
    }

    /// Creates a document from the body's `newResource` values.
    ///
    /// The `post` chain runs before the document is saved. Either `post.success` or
    /// `post.error` follows, and the client is redirected to the collection in both cases.
    /// A body without usable values skips `post` and goes straight to `post.error`.
    pub async fn collection_post<Req, Res>(&self, req: &mut Req, res: &mut Res) -> RestResult<()>
    where
        Req: ResourceRequest,
        Res: ResourceResponse,
    {
        let resource = req.resource().to_string();
        let model = self.model(&resource)?;

        let created = req
            .submitted(NEW_RESOURCE_FIELD)
            .cloned()
            .ok_or(RestError::NothingSubmitted)
            .and_then(|values| model.create(values).map_err(RestError::from));

        let (mut doc, outcome) = match created {
            Ok(mut doc) => {
                let outcome = async {
                    self.interceptors
                        .run(&resource, event::POST, &mut doc)
                        .await?;
                    model.save(&mut doc).await?;
                    Ok::<(), RestError>(())
                }
                .await;
                (Some(doc), outcome)
            }
            // `post.error` still gets a document to look at, built from no values.
            Err(err) => (model.create(json!({})).ok(), Err(err)),
        };

        let settlement = Settlement {
            resource: &resource,
            success: event::POST_SUCCESS,
            failure: event::POST_ERROR,
            redirect: self.config.collection_url(&resource),
        };
        self.settle(req, res, doc.as_mut(), outcome, settlement).await;

        Ok(())
    }

    /// Shows a single document through the `get` chain and [`render_entity`](Self::render_entity).
    pub async fn entity_get<Req, Res>(&self, req: &Req, res: &mut Res) -> RestResult<()>
    where
        Req: ResourceRequest,
        Res: ResourceResponse,
    {
        let resource = req.resource();
        let model = self.model(resource)?;
        let id = route_id(req)?;

        let mut doc = load(model, resource, &id).await?;

        self.interceptors
            .run(resource, event::GET, &mut doc)
            .await?;

        self.render_entity(&doc, req, res)
    }

    /// Updates a document with the body's `resource` values.
    ///
    /// The values are applied and the `put` chain runs before saving. The client is
    /// redirected to the document after `put.success` or `put.error`.
    pub async fn entity_put<Req, Res>(&self, req: &mut Req, res: &mut Res) -> RestResult<()>
    where
        Req: ResourceRequest,
        Res: ResourceResponse,
    {
        let resource = req.resource().to_string();
        let model = self.model(&resource)?;
        let id = route_id(req)?;

        let mut doc = load(model, &resource, &id).await?;
        let values = req
            .submitted(RESOURCE_FIELD)
            .cloned()
            .ok_or(RestError::NothingSubmitted);

        let outcome = async {
            model.apply(&mut doc, values?)?;
            self.interceptors
                .run(&resource, event::PUT, &mut doc)
                .await?;
            model.save(&mut doc).await?;
            Ok::<(), RestError>(())
        }
        .await;

        let settlement = Settlement {
            resource: &resource,
            success: event::PUT_SUCCESS,
            failure: event::PUT_ERROR,
            redirect: self.config.entity_url(&resource, &id),
        };
        self.settle(req, res, Some(&mut doc), outcome, settlement).await;

        Ok(())
    }

    /// Removes a document after its `delete` chain, then redirects to the collection.
    pub async fn entity_delete<Req, Res>(&self, req: &mut Req, res: &mut Res) -> RestResult<()>
    where
        Req: ResourceRequest,
        Res: ResourceResponse,
    {
        let resource = req.resource().to_string();
        let model = self.model(&resource)?;
        let id = route_id(req)?;

        let mut doc = load(model, &resource, &id).await?;

        let outcome = async {
            self.interceptors
                .run(&resource, event::DELETE, &mut doc)
                .await?;
            model.remove(&doc).await?;
            Ok::<(), RestError>(())
        }
        .await;

        let settlement = Settlement {
            resource: &resource,
            success: event::DELETE_SUCCESS,
            failure: event::DELETE_ERROR,
            redirect: self.config.collection_url(&resource),
        };
        self.settle(req, res, Some(&mut doc), outcome, settlement).await;

        Ok(())
    }

    /// Responds with a fetched collection.
    ///
    /// XHR requests get `{ docs }` as JSON when `enable_xhr` is set. Everything else renders
    /// `<view_path><view_prefix><resource>` with `{ docs, site: "<resource>-list" }`.
    pub fn render_collection<Req, Res>(&self, docs: &[D], req: &Req, res: &mut Res) -> RestResult<()>
    where
        Req: ResourceRequest,
        Res: ResourceResponse,
    {
        let resource = req.resource();
        let docs = serde_json::to_value(docs).map_err(StoreError::from)?;

        if self.config.enable_xhr && req.is_xhr() {
            res.send(json!({ "docs": docs }));
        } else {
            res.render(
                &self.config.collection_view(resource),
                json!({ "docs": docs, "site": format!("{resource}-list") }),
            );
        }

        Ok(())
    }

    /// Responds with a single document, as [`render_collection`](Self::render_collection)
    /// does, using `{ doc }` and the `<resource>_show` view.
    pub fn render_entity<Req, Res>(&self, doc: &D, req: &Req, res: &mut Res) -> RestResult<()>
    where
        Req: ResourceRequest,
        Res: ResourceResponse,
    {
        let resource = req.resource();
        let doc = serde_json::to_value(doc).map_err(StoreError::from)?;

        if self.config.enable_xhr && req.is_xhr() {
            res.send(json!({ "doc": doc }));
        } else {
            res.render(
                &self.config.entity_view(resource),
                json!({ "doc": doc, "site": format!("{resource}-show") }),
            );
        }

        Ok(())
    }

    async fn settle<Req, Res>(
        &self,
        req: &mut Req,
        res: &mut Res,
        doc: Option<&mut D>,
        outcome: RestResult<()>,
        settlement: Settlement<'_>,
    ) where
        Req: ResourceRequest,
        Res: ResourceResponse,
    {
        let Settlement {
            resource,
            success,
            failure,
            redirect,
        } = settlement;

        let event = if outcome.is_ok() { success } else { failure };

        match &outcome {
            Ok(()) => debug!(resource, event, "write succeeded"),
            Err(err) => warn!(resource, event, error = %err, "write failed"),
        }

        // The branch is already decided; a failing follow-up only gets logged.
        if let Some(doc) = doc {
            if let Err(err) = self.interceptors.run(resource, event, doc).await {
                warn!(resource, event, error = %err, "interceptor failed");
            }
        }

        if let Err(err) = outcome {
            req.flash(FlashKind::Error, format!("Error: {}", err.message()));
        }

        res.redirect(&redirect);
    }
}

fn route_id<Req: ResourceRequest>(req: &Req) -> RestResult<String> {
    req.id()
        .map(str::to_string)
        .ok_or_else(|| RestError::MissingId(req.resource().to_string()))
}

async fn load<D>(model: &dyn ResourceModel<D>, resource: &str, id: &str) -> RestResult<D>
where
    D: Send + Sync + 'static,
{
    model
        .find_by_id(id)
        .await?
        .ok_or_else(|| RestError::DocumentNotFound(id.to_string(), resource.to_string()))
}
