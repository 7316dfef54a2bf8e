//! Presentation layer for gdrive-mcp
//!
//! This crate contains the CLI definitions, the MCP JSON-RPC handler and
//! the axum HTTP transport serving it.

pub mod cli;
pub mod mcp;
pub mod server;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use mcp::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpHandler};
pub use server::{McpServer, ServerError, cancel_on_ctrl_c, router};
