//! MCP protocol handling — JSON-RPC dispatch.

pub mod handler;

pub use handler::ProtocolHandler;
