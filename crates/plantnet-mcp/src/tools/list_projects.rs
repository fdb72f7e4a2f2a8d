//! Tool: list_projects — list selectable flora databases.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use plantnet::{default_lang, PlantNetClient};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default = "default_lang")]
    lang: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "list_projects".to_string(),
        description: Some(
            "List the regional flora databases available for identification".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "lang": { "type": "string", "default": "en" }
            }
        }),
    }
}

pub async fn execute(args: Value, client: &Arc<PlantNetClient>) -> McpResult<ToolCallResult> {
    let params: ListParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let directory = client.list_projects(&params.lang).await?;
    Ok(ToolCallResult::json(&directory))
}
