//! Model Context Protocol over JSON-RPC 2.0

pub mod handler;
pub mod protocol;
pub mod request_config;

pub use handler::McpHandler;
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION};
pub use request_config::{RequestConfigError, decode_credentials};
