#![allow(dead_code)]

use docrest::{async_trait, prelude::*};
use serde_json::Value;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// Everything observable during a request, in the order it happened.
#[derive(Clone, Default)]
pub struct Timeline(Arc<Mutex<Vec<String>>>);

impl Timeline {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// An interceptor that records `label` when it runs.
    pub fn interceptor(&self, label: &str) -> Recording {
        Recording {
            label: label.to_string(),
            timeline: self.clone(),
            delay: None,
            failure: None,
            with_doc: false,
        }
    }
}

pub struct Recording {
    label: String,
    timeline: Timeline,
    delay: Option<Duration>,
    failure: Option<String>,
    with_doc: bool,
}

impl Recording {
    /// Completes after a short sleep instead of immediately.
    pub fn delayed(mut self) -> Self {
        self.delay = Some(Duration::from_millis(1));
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Records `label:<doc name>` instead of `label`.
    pub fn with_doc(mut self) -> Self {
        self.with_doc = true;
        self
    }
}

fn doc_name<D: serde::Serialize>(doc: &D) -> String {
    serde_json::to_value(doc)
        .ok()
        .and_then(|value| value.get("name").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default()
}

#[async_trait]
impl<D> Interceptor<D> for Recording
where
    D: serde::Serialize + Send + Sync,
{
    async fn intercept(&self, ctx: InterceptorContext<'_, D>) -> InterceptorResult {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.with_doc {
            self.timeline
                .push(format!("{}:{}", self.label, doc_name(&*ctx.doc)));
        } else {
            self.timeline.push(self.label.clone());
        }

        match &self.failure {
            Some(message) => Err(InterceptorError::new(message.clone())),
            None => Ok(()),
        }
    }
}

pub struct TestRequest {
    pub resource: String,
    pub id: Option<String>,
    pub xhr: bool,
    pub body: Option<Value>,
    pub flashes: Vec<(String, String)>,
    timeline: Timeline,
}

impl TestRequest {
    pub fn new(resource: &str, timeline: &Timeline) -> Self {
        Self {
            resource: resource.to_string(),
            id: None,
            xhr: false,
            body: None,
            flashes: Vec::new(),
            timeline: timeline.clone(),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn xhr(mut self) -> Self {
        self.xhr = true;
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl ResourceRequest for TestRequest {
    fn resource(&self) -> &str {
        &self.resource
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn is_xhr(&self) -> bool {
        self.xhr
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn flash(&mut self, kind: FlashKind, message: String) {
        self.timeline.push(format!("flash:{kind}"));
        self.flashes.push((kind.to_string(), message));
    }
}

pub struct TestResponse {
    pub sent: Vec<Value>,
    pub rendered: Vec<(String, Value)>,
    pub redirects: Vec<String>,
    timeline: Timeline,
}

impl TestResponse {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            sent: Vec::new(),
            rendered: Vec::new(),
            redirects: Vec::new(),
            timeline: timeline.clone(),
        }
    }
}

impl ResourceResponse for TestResponse {
    fn send(&mut self, body: Value) {
        self.timeline.push("send");
        self.sent.push(body);
    }

    fn render(&mut self, view: &str, locals: Value) {
        self.timeline.push(format!("render:{view}"));
        self.rendered.push((view.to_string(), locals));
    }

    fn redirect(&mut self, url: &str) {
        self.timeline.push(format!("redirect:{url}"));
        self.redirects.push(url.to_string());
    }
}

#[derive(Default)]
struct MockState {
    docs: Vec<Value>,
    find_error: Option<String>,
    save_error: Option<String>,
    saved: Vec<Value>,
}

/// A model over JSON documents whose failures are scripted by the test.
#[derive(Clone, Default, Debug)]
pub struct MockModel {
    state: Arc<Mutex<MockState>>,
}

impl std::fmt::Debug for MockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockState")
            .field("docs", &self.docs.len())
            .finish()
    }
}

impl MockModel {
    pub fn with_docs(docs: Vec<Value>) -> Self {
        let model = Self::default();
        model.state.lock().unwrap().docs = docs;
        model
    }

    pub fn fail_find(self, message: &str) -> Self {
        self.state.lock().unwrap().find_error = Some(message.to_string());
        self
    }

    pub fn fail_save(self, message: &str) -> Self {
        self.state.lock().unwrap().save_error = Some(message.to_string());
        self
    }

    pub fn saved(&self) -> Vec<Value> {
        self.state.lock().unwrap().saved.clone()
    }
}

#[async_trait]
impl ResourceModel<Value> for MockModel {
    async fn find(&self, _query: ListQuery) -> StoreResult<Vec<Value>> {
        let state = self.state.lock().unwrap();

        match &state.find_error {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(state.docs.clone()),
        }
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Value>> {
        let state = self.state.lock().unwrap();

        Ok(state
            .docs
            .iter()
            .find(|doc| doc.get("id").and_then(Value::as_str) == Some(id))
            .cloned())
    }

    fn create(&self, values: Value) -> StoreResult<Value> {
        Ok(values)
    }

    fn apply(&self, doc: &mut Value, values: Value) -> StoreResult<()> {
        *doc = values;
        Ok(())
    }

    async fn save(&self, doc: &mut Value) -> StoreResult<()> {
        tokio::time::sleep(Duration::from_millis(1)).await;

        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.save_error {
            return Err(StoreError::Backend(message.clone()));
        }

        state.saved.push(doc.clone());
        Ok(())
    }

    async fn remove(&self, _doc: &Value) -> StoreResult<()> {
        Ok(())
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
