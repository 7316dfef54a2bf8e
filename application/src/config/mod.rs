//! Application-level configuration.
//!
//! - [`ToolParams`]: limits applied by the Drive use cases (batch concurrency, page sizes)
//! - [`Credentials`]: OAuth client credentials, mergeable per invocation

pub mod credentials;
pub mod tool_params;

pub use credentials::Credentials;
pub use tool_params::ToolParams;
