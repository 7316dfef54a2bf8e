//! MCP method dispatch.

use super::protocol::{
    CallToolParams, CallToolResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    JSONRPC_VERSION, PROTOCOL_VERSION,
};
use gdrive_application::{Credentials, ToolExecutorFactory, ToolSchemaPort};
use gdrive_domain::ToolCall;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

const SERVER_NAME: &str = "gdrive-mcp";

/// Serves MCP requests against the Drive tool set.
///
/// Holds no per-session state: each message is answered on its own, with
/// the executor chosen for that message's credentials.
pub struct McpHandler {
    executors: Arc<dyn ToolExecutorFactory>,
    schema: Arc<dyn ToolSchemaPort>,
    server_name: String,
    server_version: String,
}

impl McpHandler {
    pub fn new(executors: Arc<dyn ToolExecutorFactory>, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            executors,
            schema,
            server_name: SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.server_name = name.into();
        self.server_version = version.into();
        self
    }

    /// Handle one raw JSON-RPC message.
    ///
    /// Returns `None` for notifications, which get no response.
    pub async fn handle_message(
        &self,
        body: &str,
        credentials: &Credentials,
    ) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(e),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => return Some(JsonRpcResponse::failure(id, JsonRpcError::invalid_request(e))),
        };
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_request(format!("unsupported jsonrpc {}", request.jsonrpc)),
            ));
        }

        self.handle(request, credentials).await
    }

    /// Handle a parsed request or notification
    pub async fn handle(
        &self,
        request: JsonRpcRequest,
        credentials: &Credentials,
    ) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!("Notification {}", request.method);
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize(request.params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(request.params, credentials).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self, params: Option<&Value>) -> Value {
        let version = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(PROTOCOL_VERSION);
        info!("Client initialized with protocol {}", version);

        json!({
            "protocolVersion": version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.server_name,
                "version": self.server_version,
            }
        })
    }

    fn list_tools(&self) -> Value {
        let executor = self.executors.default_executor();
        json!({ "tools": self.schema.all_tools_schema(executor.tool_spec()) })
    }

    async fn call_tool(
        &self,
        params: Option<Value>,
        credentials: &Credentials,
    ) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(JsonRpcError::invalid_params)?;
        let call = ToolCall::from_json(params.name, params.arguments.unwrap_or(Value::Null))
            .map_err(JsonRpcError::invalid_params)?;

        let executor = self.executors.executor_with(credentials);
        let result = executor.execute(&call).await;

        Ok(json!(CallToolResult::from(&result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubFactory, StubSchema};

    fn handler() -> McpHandler {
        McpHandler::new(Arc::new(StubFactory), Arc::new(StubSchema))
            .with_server_info("gdrive-mcp", "1.2.3")
    }

    async fn send(handler: &McpHandler, body: Value) -> JsonRpcResponse {
        handler
            .handle_message(&body.to_string(), &Credentials::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = send(
            &handler(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2025-03-26",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "0"}
            }}),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(response.id, json!(1));
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], "gdrive-mcp");
        assert_eq!(result["serverInfo"]["version"], "1.2.3");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_initialize_defaults_protocol_version() {
        let response = send(
            &handler(),
            json!({"jsonrpc": "2.0", "id": "init", "method": "initialize"}),
        )
        .await;
        assert_eq!(response.result.unwrap()["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_ping() {
        let response = send(&handler(), json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})).await;
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = send(
            &handler(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"}),
        )
        .await;
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools, json!([{"name": "echo"}, {"name": "fail"}]));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let response = send(
            &handler(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {
                "name": "echo", "arguments": {"text": "hello"}
            }}),
        )
        .await;
        assert_eq!(
            response.result.unwrap(),
            json!({"content": [{"type": "text", "text": "default:hello"}], "isError": false})
        );
    }

    #[tokio::test]
    async fn test_tool_failure_is_a_result() {
        let response = send(
            &handler(),
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {"name": "fail"}}),
        )
        .await;
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "boom");
    }

    #[tokio::test]
    async fn test_tools_call_uses_request_credentials() {
        let credentials = Credentials {
            refresh_token: Some("request".into()),
            ..Default::default()
        };
        let body = json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {
            "name": "echo", "arguments": {"text": "hi"}
        }});
        let response = handler()
            .handle_message(&body.to_string(), &credentials)
            .await
            .unwrap();
        assert_eq!(response.result.unwrap()["content"][0]["text"], "request:hi");
    }

    #[tokio::test]
    async fn test_tools_call_bad_params() {
        let handler = handler();
        let missing_name = send(
            &handler,
            json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {}}),
        )
        .await;
        assert_eq!(missing_name.error.unwrap().code, JsonRpcError::INVALID_PARAMS);

        let array_args = send(
            &handler,
            json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call", "params": {
                "name": "echo", "arguments": [1]
            }}),
        )
        .await;
        let error = array_args.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
        assert!(error.message.contains("JSON object"));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = send(
            &handler(),
            json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"}),
        )
        .await;
        assert_eq!(response.id, json!(9));
        assert_eq!(response.error.unwrap().code, JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let response = handler()
            .handle_message("{not json", &Credentials::default())
            .await
            .unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, JsonRpcError::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let handler = handler();
        let no_method = send(&handler, json!({"jsonrpc": "2.0", "id": 10})).await;
        assert_eq!(no_method.id, json!(10));
        assert_eq!(no_method.error.unwrap().code, JsonRpcError::INVALID_REQUEST);

        let old_version =
            send(&handler, json!({"jsonrpc": "1.0", "id": 11, "method": "ping"})).await;
        assert_eq!(old_version.error.unwrap().code, JsonRpcError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let body = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(
            handler()
                .handle_message(&body.to_string(), &Credentials::default())
                .await
                .is_none()
        );
    }
}
