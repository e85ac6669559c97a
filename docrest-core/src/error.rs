//! Error types and result types for resource handling.
//!
//! Three layers of failure exist: the document store ([`StoreError`]), an interceptor
//! refusing a lifecycle event ([`InterceptorError`]), and the request handlers themselves
//! ([`RestError`]), which wrap the other two.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents the errors a [`ResourceModel`](crate::model::ResourceModel) can report.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The requested document was not found in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document not found {0} in collection {1}")]
    DocumentNotFound(String, String),
    /// The submitted values cannot form a document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// The message the store reported, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            StoreError::Serialization(message)
            | StoreError::InvalidDocument(message)
            | StoreError::Backend(message) => message.clone(),
            StoreError::DocumentNotFound(..) => self.to_string(),
        }
    }
}

/// A specialized `Result` type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// The failure signaled by an [`Interceptor`](crate::interceptor::Interceptor).
///
/// Its display form is the bare message, so a flash message built from it reads
/// `Error: <message>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InterceptorError {
    message: String,
}

impl InterceptorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The completion signal of a single interceptor, or of a whole interceptor chain.
pub type InterceptorResult = Result<(), InterceptorError>;

/// Errors surfaced by the request handlers to the host framework's error path.
#[derive(Error, Debug)]
pub enum RestError {
    /// The document store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// An interceptor stopped the chain.
    #[error(transparent)]
    Interceptor(#[from] InterceptorError),
    /// No model is registered under the requested resource name.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    /// The first argument is the document ID, the second is the resource name.
    #[error("Document {0} not found in resource {1}")]
    DocumentNotFound(String, String),
    /// An entity route was hit without a document ID.
    #[error("Missing document id for resource {0}")]
    MissingId(String),
    /// The request body lacks the field holding the submitted values.
    #[error("Nothing submitted")]
    NothingSubmitted,
}

impl RestError {
    /// The message shown to users in a flash, without the store's variant prefix.
    pub fn message(&self) -> String {
        match self {
            RestError::Store(err) => err.message(),
            RestError::Interceptor(err) => err.message().to_string(),
            _ => self.to_string(),
        }
    }
}

/// A specialized `Result` type for the request handlers.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interceptor_error_displays_bare_message() {
        let err = InterceptorError::new("Some Error");

        assert_eq!(err.to_string(), "Some Error");
        assert_eq!(format!("Error: {}", RestError::from(err)), "Error: Some Error");
    }

    #[test]
    fn store_errors_pass_through_rest_error() {
        let err = RestError::from(StoreError::Backend("disk full".to_string()));

        assert_eq!(err.to_string(), "Backend error: disk full");
    }

    #[test]
    fn messages_drop_the_store_prefix() {
        let store = RestError::from(StoreError::Backend("Some Error".to_string()));
        let interceptor = RestError::from(InterceptorError::new("name is taken"));

        assert_eq!(store.message(), "Some Error");
        assert_eq!(interceptor.message(), "name is taken");
        assert_eq!(RestError::NothingSubmitted.message(), "Nothing submitted");
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        assert!(matches!(StoreError::from(json_err), StoreError::Serialization(_)));
    }
}
