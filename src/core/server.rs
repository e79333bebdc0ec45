//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! Tools are defined in `domains/tools/definitions/` and the ToolRouter is
//! built in `domains/tools/router.rs`, so adding a tool does not touch this
//! file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Error;
use crate::domains::{
    expenses::ExpenseStore, resources::ResourceService, tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Expense tracker. Record expenses with add_expense, list them with \
    list_expenses and get per-category totals with summarize. Dates use YYYY-MM-DD. \
    Also offers add and random_number utilities.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between the domain services.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Expense store shared by the expense tools.
    store: Arc<ExpenseStore>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server on top of an already initialized store.
    pub fn new(config: Config, store: ExpenseStore) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(store);

        let resource_service = Arc::new(ResourceService::new(config.server.clone()));

        Self {
            tool_router: build_tool_router::<Self>(store.clone()),
            config,
            store,
            resource_service,
        }
    }

    /// Initialize storage and create the server.
    ///
    /// Fails if the database cannot be opened or its schema cannot be
    /// created; the server must not start in that case.
    pub fn bootstrap(config: Config) -> crate::Result<Self> {
        if config.storage.db_path.as_os_str().is_empty() {
            return Err(Error::config("database path is empty"));
        }

        let store = ExpenseStore::new(config.storage.clone());
        store.initialize()?;

        Ok(Self::new(config, store))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the expense store.
    pub fn store(&self) -> &Arc<ExpenseStore> {
        &self.store
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> crate::Result<serde_json::Value> {
        let registry = ToolRegistry::new(self.store.clone());
        Ok(registry.call_tool(name, arguments).await?)
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> crate::Result<serde_json::Value> {
        let result = self.resource_service.read_resource(uri).await?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            storage: StorageConfig::at(dir.path().join("expenses.db")),
            ..Config::default()
        }
    }

    #[test]
    fn test_bootstrap_creates_database() {
        let dir = TempDir::new().unwrap();
        let server = McpServer::bootstrap(test_config(&dir)).unwrap();
        assert!(server.store().path().exists());
        assert_eq!(server.name(), "ExpenseTracker");
    }

    #[test]
    fn test_bootstrap_fails_on_unusable_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();

        let config = Config {
            storage: StorageConfig::at(blocker.join("expenses.db")),
            ..Config::default()
        };
        let result = McpServer::bootstrap(config);
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_bootstrap_rejects_empty_path() {
        let config = Config {
            storage: StorageConfig::at(""),
            ..Config::default()
        };
        assert!(matches!(McpServer::bootstrap(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_list_tools() {
        let dir = TempDir::new().unwrap();
        let server = McpServer::bootstrap(test_config(&dir)).unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 5);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_get_info_enables_tools_and_resources() {
        let dir = TempDir::new().unwrap();
        let server = McpServer::bootstrap(test_config(&dir)).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
    }

    #[tokio::test]
    async fn test_read_resource_unknown_uri() {
        let dir = TempDir::new().unwrap();
        let server = McpServer::bootstrap(test_config(&dir)).unwrap();
        let result = server.read_resource("expense:///missing").await;
        assert!(matches!(result, Err(Error::Resource(_))));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_round_trip() {
        let dir = TempDir::new().unwrap();
        let server = McpServer::bootstrap(test_config(&dir)).unwrap();

        server
            .call_tool(
                "add_expense",
                serde_json::json!({ "date": "2024-01-10", "amount": 40, "category": "Transportation" }),
            )
            .await
            .unwrap();
        let summary = server
            .call_tool(
                "summarize",
                serde_json::json!({ "start_date": "2024-01-01", "end_date": "2024-01-31" }),
            )
            .await
            .unwrap();

        let text = summary["content"][0]["text"].as_str().unwrap();
        let rows: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(
            rows,
            serde_json::json!([{ "category": "Transportation", "total_amount": 40.0, "count": 1 }])
        );
    }
}
