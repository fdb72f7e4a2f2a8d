//! Tool: identify_plant — identify a plant from photo URLs.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use plantnet::{
    default_lang, default_nb_results, default_project, IdentificationRequest, Organ,
    PlantNetClient, MAX_IMAGES, MAX_RESULTS,
};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct IdentifyParams {
    image_urls: Vec<String>,
    /// Closed enum: any unrecognized tag fails deserialization here,
    /// before the client is involved.
    organs: Vec<Organ>,
    #[serde(default = "default_project")]
    project: String,
    #[serde(default = "default_lang")]
    lang: String,
    #[serde(default = "default_nb_results")]
    nb_results: u32,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "identify_plant".to_string(),
        description: Some(
            "Identify a plant species from 1-5 photo URLs with matching organ tags".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "image_urls": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "maxItems": 5,
                    "description": "URLs of plant photos; image N pairs with organ N"
                },
                "organs": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": ["leaf", "flower", "fruit", "bark", "habit", "auto", "other"]
                    },
                    "minItems": 1,
                    "maxItems": 5,
                    "description": "Plant part visible in each photo, one per image URL"
                },
                "project": {
                    "type": "string",
                    "default": "all",
                    "description": "Flora database to match against (see list_projects)"
                },
                "lang": { "type": "string", "default": "en" },
                "nb_results": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 25,
                    "default": 5,
                    "description": "How many ranked candidates to return"
                }
            },
            "required": ["image_urls", "organs"]
        }),
    }
}

pub async fn execute(args: Value, client: &Arc<PlantNetClient>) -> McpResult<ToolCallResult> {
    let params: IdentifyParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    if params.image_urls.len() != params.organs.len() {
        return Err(McpError::InvalidParams(format!(
            "image_urls and organs must have the same length ({} vs {})",
            params.image_urls.len(),
            params.organs.len()
        )));
    }
    if params.image_urls.is_empty() || params.image_urls.len() > MAX_IMAGES {
        return Err(McpError::InvalidParams(format!(
            "image_urls must contain between 1 and {MAX_IMAGES} entries"
        )));
    }
    if params.nb_results < 1 || params.nb_results > MAX_RESULTS {
        return Err(McpError::InvalidParams(format!(
            "nb_results must be between 1 and {MAX_RESULTS}"
        )));
    }

    let request = IdentificationRequest {
        images: params.image_urls,
        organs: params.organs,
        project: params.project,
        lang: params.lang,
        nb_results: params.nb_results,
    };

    let result = client.identify(&request).await?;
    Ok(ToolCallResult::text(plantnet::render(&result)))
}
