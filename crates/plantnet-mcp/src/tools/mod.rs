//! MCP tool implementations.

pub mod check_quota;
pub mod identify_plant;
pub mod list_projects;
pub mod registry;

pub use registry::ToolRegistry;
