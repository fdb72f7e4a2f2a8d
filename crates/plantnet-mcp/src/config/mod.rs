//! Configuration loading and resolution.

use crate::types::{McpError, McpResult};

/// Primary environment variable for the API credential.
pub const API_KEY_VAR: &str = "PLANTNET_API_KEY";

/// Legacy variable name, still honored as a fallback.
pub const API_KEY_VAR_LEGACY: &str = "PLANTNET_KEY";

/// Resolve the PlantNet API key: explicit flag, then primary env var,
/// then the legacy fallback. Missing or empty everywhere is fatal.
pub fn resolve_api_key(explicit: Option<&str>) -> McpResult<String> {
    if let Some(key) = explicit {
        if !key.trim().is_empty() {
            return Ok(key.to_string());
        }
    }

    for var in [API_KEY_VAR, API_KEY_VAR_LEGACY] {
        if let Ok(key) = std::env::var(var) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }
    }

    Err(McpError::CredentialMissing(format!(
        "set {API_KEY_VAR} (get a key at https://my.plantnet.org)"
    )))
}
