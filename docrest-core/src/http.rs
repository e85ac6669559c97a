//! The host web framework seam.
//!
//! The adapter does not own routing, sessions, or templating. It reads what it needs from a
//! [`ResourceRequest`] and answers through a [`ResourceResponse`], which the host framework
//! implements over its own request and response types.

use serde_json::Value;
use std::fmt;

/// The body field holding the values of a document being created.
pub const NEW_RESOURCE_FIELD: &str = "newResource";

/// The body field holding the values of a document being updated.
pub const RESOURCE_FIELD: &str = "resource";

/// Category of a flash message shown to the user on the next page.
///
/// The handlers only ever report failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashKind {
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Error => "error",
        }
    }
}

impl fmt::Display for FlashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An incoming request routed to a resource.
pub trait ResourceRequest: Send {
    /// The resource name taken from the route.
    fn resource(&self) -> &str;

    /// The document identifier taken from the route, for entity routes.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Whether the request was issued by an in-page script expecting data.
    fn is_xhr(&self) -> bool;

    /// The parsed request body.
    fn body(&self) -> Option<&Value>;

    /// Records a message to display on the next rendered page.
    fn flash(&mut self, kind: FlashKind, message: String);

    /// The values submitted under `field` in the body.
    fn submitted(&self, field: &str) -> Option<&Value> {
        self.body().and_then(|body| body.get(field))
    }
}

/// The response a handler finishes with.
pub trait ResourceResponse: Send {
    /// Sends `body` as a JSON data response.
    fn send(&mut self, body: Value);

    /// Renders the template `view` with `locals`.
    fn render(&mut self, view: &str, locals: Value);

    /// Redirects the client to `url`.
    fn redirect(&mut self, url: &str);
}
