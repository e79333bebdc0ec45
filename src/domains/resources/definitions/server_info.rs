//! Server info resource definition.

use super::ResourceDefinition;
use crate::core::config::ServerConfig;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};
use crate::domains::tools::ToolRegistry;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "info://server";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Name, version and available tools of this MCP server";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}

impl ServerInfoResource {
    /// Build the metadata document for the given server configuration.
    pub fn document(server: &ServerConfig) -> serde_json::Value {
        serde_json::json!({
            "name": server.name,
            "version": server.version,
            "description": server.description,
            "tools": ToolRegistry::tool_names(),
            "author": server.author,
        })
    }
}
