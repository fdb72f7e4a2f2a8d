//! Error types and JSON-RPC error codes for the MCP server.

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// MCP and domain error codes.
pub mod mcp_error_codes {
    pub const TOOL_NOT_FOUND: i32 = -32803;

    /// The identification request failed shape validation.
    pub const VALIDATION_FAILED: i32 = -32850;
    /// An image URL could not be retrieved.
    pub const IMAGE_FETCH_FAILED: i32 = -32851;
    /// The PlantNet API answered with a non-success status.
    pub const UPSTREAM_ERROR: i32 = -32852;
    /// The API credential is missing or empty.
    pub const CREDENTIAL_MISSING: i32 = -32853;
}

/// All errors the MCP server can surface to the host.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Image fetch failed: {0}")]
    ImageFetch(String),

    #[error("PlantNet API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("PlantNet API key is missing: {0}")]
    CredentialMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) | McpError::Io(_) => INTERNAL_ERROR,
            McpError::ToolNotFound(_) => TOOL_NOT_FOUND,
            McpError::ValidationFailed(_) => VALIDATION_FAILED,
            McpError::ImageFetch(_) => IMAGE_FETCH_FAILED,
            McpError::Upstream { .. } => UPSTREAM_ERROR,
            McpError::CredentialMissing(_) => CREDENTIAL_MISSING,
            McpError::Json(_) => PARSE_ERROR,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

impl From<plantnet::Error> for McpError {
    fn from(e: plantnet::Error) -> Self {
        match e {
            plantnet::Error::MissingApiKey => {
                McpError::CredentialMissing("API key must not be empty".to_string())
            }
            plantnet::Error::InvalidRequest(msg) => McpError::ValidationFailed(msg),
            plantnet::Error::ImageFetch { url, reason } => {
                McpError::ImageFetch(format!("{url}: {reason}"))
            }
            plantnet::Error::Api { status, body } => McpError::Upstream { status, body },
            plantnet::Error::Http(e) => McpError::InternalError(e.to_string()),
            plantnet::Error::Json(e) => McpError::InternalError(e.to_string()),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;
