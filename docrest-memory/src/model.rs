//! In-memory storage for a single resource.
//!
//! Documents are kept as BSON documents in insertion order behind an async-safe
//! read-write lock. Every document carries its identifier as a string in [`ID_FIELD`].

use async_trait::async_trait;
use bson::{Bson, Document, Uuid, ser::serialize_to_bson};
use mea::rwlock::RwLock;
use serde_json::Value;
use std::{cmp::Ordering, sync::Arc};
use tracing::debug;

use docrest_core::{
    error::{StoreError, StoreResult},
    model::{ListQuery, ResourceModel, SortDirection},
};

/// The field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// Thread-safe in-memory model for one resource.
///
/// `InMemoryModel` is cloneable and uses an `Arc`-wrapped internal state, so a clone can be
/// handed to an adapter while the original is kept for inspection. Clones share the same
/// documents.
///
/// Lookups scan the collection; there is no indexing.
#[derive(Clone, Debug)]
pub struct InMemoryModel {
    name: String,
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryModel {
    /// Creates an empty model for the collection `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a builder for a model seeded with documents.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use docrest_memory::InMemoryModel;
    /// use bson::doc;
    ///
    /// let users = InMemoryModel::builder("user")
    ///     .document(doc! { "name": "Alice" })
    ///     .document(doc! { "name": "Bob" })
    ///     .build();
    /// ```
    pub fn builder(name: impl Into<String>) -> InMemoryModelBuilder {
        InMemoryModelBuilder {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stored documents.
    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }
}

fn document_id(doc: &Document) -> Option<&str> {
    doc.get_str(ID_FIELD).ok()
}

fn new_id() -> String {
    Uuid::new().to_string()
}

fn to_document(values: Value) -> StoreResult<Document> {
    match serialize_to_bson(&values)? {
        Bson::Document(doc) => Ok(doc),
        other => Err(StoreError::InvalidDocument(format!(
            "expected an object, got {other}"
        ))),
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Orders two field values; missing and null values sort first.
fn compare(left: Option<&Bson>, right: Option<&Bson>) -> Ordering {
    let left = left.filter(|value| !matches!(value, Bson::Null));
    let right = right.filter(|value| !matches!(value, Bson::Null));

    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => {
            if let (Some(a), Some(b)) = (as_number(left), as_number(right)) {
                return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            }

            match (left, right) {
                (Bson::String(a), Bson::String(b)) => a.cmp(b),
                (Bson::Boolean(a), Bson::Boolean(b)) => a.cmp(b),
                (Bson::DateTime(a), Bson::DateTime(b)) => a.cmp(b),
                _ => Ordering::Equal,
            }
        }
    }
}

#[async_trait]
impl ResourceModel<Document> for InMemoryModel {
    async fn find(&self, query: ListQuery) -> StoreResult<Vec<Document>> {
        let mut documents = self.documents.read().await.to_vec();

        if let Some(sort) = &query.sort {
            documents.sort_by(|a, b| {
                let ordering = compare(a.get(&sort.field), b.get(&sort.field));

                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        Ok(documents)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        let documents = self.documents.read().await;

        Ok(documents
            .iter()
            .find(|doc| document_id(doc) == Some(id))
            .cloned())
    }

    fn create(&self, values: Value) -> StoreResult<Document> {
        let mut doc = to_document(values)?;
        doc.remove(ID_FIELD);

        Ok(doc)
    }

    fn apply(&self, doc: &mut Document, values: Value) -> StoreResult<()> {
        for (key, value) in to_document(values)? {
            if key != ID_FIELD {
                doc.insert(key, value);
            }
        }

        Ok(())
    }

    async fn save(&self, doc: &mut Document) -> StoreResult<()> {
        let mut documents = self.documents.write().await;

        let id = match document_id(doc) {
            Some(id) => id.to_string(),
            None => {
                let id = new_id();
                doc.insert(ID_FIELD, id.clone());
                id
            }
        };

        match documents
            .iter_mut()
            .find(|existing| document_id(existing) == Some(id.as_str()))
        {
            Some(existing) => *existing = doc.clone(),
            None => documents.push(doc.clone()),
        }

        debug!(collection = %self.name, id = %id, "saved document");

        Ok(())
    }

    async fn remove(&self, doc: &Document) -> StoreResult<()> {
        let id = document_id(doc)
            .ok_or_else(|| StoreError::InvalidDocument(format!("document has no {ID_FIELD}")))?;

        let mut documents = self.documents.write().await;
        let position = documents
            .iter()
            .position(|existing| document_id(existing) == Some(id))
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string(), self.name.clone()))?;

        documents.remove(position);
        debug!(collection = %self.name, id = %id, "removed document");

        Ok(())
    }
}

/// Builder for constructing [`InMemoryModel`] instances with seed documents.
///
/// Seed documents without an [`ID_FIELD`] get a fresh identifier.
#[derive(Debug)]
pub struct InMemoryModelBuilder {
    name: String,
    documents: Vec<Document>,
}

impl InMemoryModelBuilder {
    pub fn document(mut self, doc: Document) -> Self {
        self.documents.push(doc);
        self
    }

    pub fn documents(mut self, docs: impl IntoIterator<Item = Document>) -> Self {
        self.documents.extend(docs);
        self
    }

    pub fn build(self) -> InMemoryModel {
        let documents = self
            .documents
            .into_iter()
            .map(|mut doc| {
                if document_id(&doc).is_none() {
                    doc.insert(ID_FIELD, new_id());
                }
                doc
            })
            .collect();

        InMemoryModel {
            name: self.name,
            documents: Arc::new(RwLock::new(documents)),
        }
    }
}
