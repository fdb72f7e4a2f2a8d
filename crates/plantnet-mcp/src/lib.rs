//! PlantNet MCP server — plant identification as assistant tools.

pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::resolve_api_key;
pub use protocol::ProtocolHandler;
pub use transport::StdioTransport;
