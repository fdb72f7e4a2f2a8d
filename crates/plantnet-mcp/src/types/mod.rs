//! MCP data types used by the server.

pub mod error;
pub mod init;
pub mod message;
pub mod tool;

pub use error::*;
pub use init::*;
pub use message::*;
pub use tool::*;
