//! Tool registration and dispatch.

use std::sync::Arc;

use serde_json::Value;

use plantnet::PlantNetClient;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{check_quota, identify_plant, list_projects};

/// Closed set of tools, dispatched by name.
pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![
            identify_plant::definition(),
            list_projects::definition(),
            check_quota::definition(),
        ]
    }

    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        client: &Arc<PlantNetClient>,
    ) -> McpResult<ToolCallResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        match name {
            "identify_plant" => identify_plant::execute(args, client).await,
            "list_projects" => list_projects::execute(args, client).await,
            "check_quota" => check_quota::execute(args),
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}
