//! Construction-time configuration for a [`RestAdapter`](crate::adapter::RestAdapter).
//!
//! The configuration is static for the lifetime of the adapter. It can be built in code
//! through [`RestConfig::builder`] or deserialized from a host application's settings,
//! where the keys are camelCase (`viewPath`, `viewPrefix`, `enableXhr`, `urlPath`, `sort`).
//!
//! # Example
//!
//! ```ignore
//! use docrest::config::RestConfig;
//!
//! let config = RestConfig::builder()
//!     .view_path("resource_views/")
//!     .view_prefix("my_lovely_resource_")
//!     .enable_xhr(true)
//!     .build();
//!
//! assert_eq!(config.collection_view("user"), "resource_views/my_lovely_resource_user");
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{ListQuery, SortDirection};

/// Rendering and routing settings shared by every resource of an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestConfig {
    /// Directory prefix of the view templates.
    pub view_path: String,
    /// Prefix prepended to the resource name to form the view name.
    pub view_prefix: String,
    /// Whether XHR requests receive JSON instead of a rendered view.
    pub enable_xhr: bool,
    /// URL prefix under which the resources are mounted.
    pub url_path: String,
    /// Field the collection listing is sorted by. A leading `-` sorts descending.
    pub sort: Option<String>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            view_path: String::new(),
            view_prefix: "resource_".to_string(),
            enable_xhr: false,
            url_path: "/resources/".to_string(),
            sort: None,
        }
    }
}

impl RestConfig {
    pub fn builder() -> RestConfigBuilder {
        RestConfigBuilder::default()
    }

    /// View name used to render a collection: `<view_path><view_prefix><resource>`.
    pub fn collection_view(&self, resource: &str) -> String {
        format!("{}{}{}", self.view_path, self.view_prefix, resource)
    }

    /// View name used to render a single document: `<view_path><view_prefix><resource>_show`.
    pub fn entity_view(&self, resource: &str) -> String {
        format!("{}_show", self.collection_view(resource))
    }

    pub fn collection_url(&self, resource: &str) -> String {
        format!("{}{}", self.url_path, resource)
    }

    pub fn entity_url(&self, resource: &str, id: &str) -> String {
        format!("{}{}/{}", self.url_path, resource, id)
    }

    /// The query issued when listing a collection.
    pub fn list_query(&self) -> ListQuery {
        match self.sort.as_deref() {
            Some(field) if !field.is_empty() => match field.strip_prefix('-') {
                Some(field) => ListQuery::new().sort(field, SortDirection::Desc),
                None => ListQuery::new().sort(field, SortDirection::Asc),
            },
            _ => ListQuery::new(),
        }
    }
}

/// Fluent builder for [`RestConfig`]. Unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct RestConfigBuilder {
    config: RestConfig,
}

impl RestConfigBuilder {
    pub fn view_path(mut self, view_path: impl Into<String>) -> Self {
        self.config.view_path = view_path.into();
        self
    }

    pub fn view_prefix(mut self, view_prefix: impl Into<String>) -> Self {
        self.config.view_prefix = view_prefix.into();
        self
    }

    pub fn enable_xhr(mut self, enable_xhr: bool) -> Self {
        self.config.enable_xhr = enable_xhr;
        self
    }

    pub fn url_path(mut self, url_path: impl Into<String>) -> Self {
        self.config.url_path = url_path.into();
        self
    }

    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.config.sort = Some(field.into());
        self
    }

    pub fn build(self) -> RestConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RestConfig::default();

        assert!(!config.enable_xhr);
        assert_eq!(config.collection_view("user"), "resource_user");
        assert_eq!(config.collection_url("user"), "/resources/user");
        assert_eq!(config.entity_url("user", "42"), "/resources/user/42");
        assert!(config.list_query().sort.is_none());
    }

    #[test]
    fn view_names_combine_path_prefix_and_resource() {
        let config = RestConfig::builder()
            .view_path("resource_views/")
            .view_prefix("my_lovely_resource_")
            .build();

        assert_eq!(config.collection_view("user"), "resource_views/my_lovely_resource_user");
        assert_eq!(config.entity_view("user"), "resource_views/my_lovely_resource_user_show");
    }

    #[test]
    fn deserializes_camel_case_keys_with_defaults() {
        let config: RestConfig = serde_json::from_value(serde_json::json!({
            "viewPath": "views/",
            "enableXhr": true,
        }))
        .unwrap();

        assert_eq!(config.view_path, "views/");
        assert_eq!(config.view_prefix, "resource_");
        assert!(config.enable_xhr);
        assert_eq!(config.url_path, "/resources/");
    }

    #[test]
    fn leading_dash_sorts_descending() {
        let query = RestConfig::builder().sort("-name").build().list_query();
        let sort = query.sort.unwrap();

        assert_eq!(sort.field, "name");
        assert_eq!(sort.direction, SortDirection::Desc);

        let query = RestConfig::builder().sort("name").build().list_query();
        assert_eq!(query.sort.unwrap().direction, SortDirection::Asc);
    }
}
