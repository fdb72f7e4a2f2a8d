//! Tool: check_quota — static quota guidance, no network call.

use serde_json::{json, Value};

use crate::types::{McpResult, ToolCallResult, ToolDefinition};

// The upstream API has no dedicated quota endpoint; the only live quota
// figure is the remainingIdentificationRequests field embedded in every
// identify response.
const QUOTA_GUIDANCE: &str = "PlantNet does not expose a standalone quota endpoint. \
Your remaining daily request count is returned with every identification as the \
\"Remaining identification requests\" line. Free accounts get 500 identification \
requests per day; run identify_plant to see your current balance.";

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "check_quota".to_string(),
        description: Some(
            "Explain how to read your remaining PlantNet request quota".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub fn execute(_args: Value) -> McpResult<ToolCallResult> {
    Ok(ToolCallResult::text(QUOTA_GUIDANCE.to_string()))
}
