//! Resource service implementation.
//!
//! The ResourceService lists the registered resources and resolves reads.
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use tracing::info;

use super::definitions::ServerInfoResource;
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::ServerConfig;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Server metadata, used by dynamic resources.
    server: ServerConfig,

    /// Registry of available resources, keyed by URI.
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Content computed at read time.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone)]
pub enum DynamicResourceType {
    /// Server metadata document.
    ServerInfo,
}

impl ResourceService {
    /// Create a new ResourceService for the given server.
    pub fn new(server: ServerConfig) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            server,
            resources: BTreeMap::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let text = match &entry.content {
            ResourceContent::Text(text) => text.clone(),
            ResourceContent::Dynamic(dynamic_type) => self.resolve_dynamic_content(dynamic_type)?,
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: entry.resource.raw.mime_type.clone(),
                text,
                meta: None,
            }],
        })
    }

    fn resolve_dynamic_content(
        &self,
        dynamic_type: &DynamicResourceType,
    ) -> Result<String, ResourceError> {
        match dynamic_type {
            DynamicResourceType::ServerInfo => {
                serde_json::to_string_pretty(&ServerInfoResource::document(&self.server))
                    .map_err(|e| ResourceError::internal(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resources::definitions::DEFAULT_CATEGORIES;

    fn read_text(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            _ => panic!("Expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_resource_service_lists_registered() {
        let service = ResourceService::new(ServerConfig::default());
        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 2);
    }

    #[tokio::test]
    async fn test_read_categories() {
        let service = ResourceService::new(ServerConfig::default());
        let result = service.read_resource("expense:///categories").await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(read_text(&result)).unwrap();
        assert_eq!(parsed, serde_json::json!({ "categories": DEFAULT_CATEGORIES }));
        match &result.contents[0] {
            ResourceContents::TextResourceContents { mime_type, .. } => {
                assert_eq!(mime_type.as_deref(), Some("application/json"));
            }
            _ => panic!("Expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_read_server_info_uses_config() {
        let server = ServerConfig {
            name: "Budget".to_string(),
            ..ServerConfig::default()
        };
        let service = ResourceService::new(server);
        let result = service.read_resource("info://server").await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(read_text(&result)).unwrap();
        assert_eq!(parsed["name"], "Budget");
        assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = ResourceService::new(ServerConfig::default());
        let result = service.read_resource("expense:///nonexistent").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }
}
