/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads newline-delimited JSON-RPC requests
/// 2. Dispatches tool calls to the request layer
/// 3. Writes one JSON-RPC response line per request

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{HabitTrackerServer, ServerError};

/// MCP server that handles communication with Claude
pub struct McpServer {
    /// The underlying streak server
    habit_tracker: HabitTrackerServer,
    /// Whether the client has sent its initialized notification
    initialized: bool,
}

/// Outcome of a failed request, before it is tied to a request id
struct RpcFailure {
    code: i32,
    message: String,
}

impl RpcFailure {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ToolError> for RpcFailure {
    fn from(e: ToolError) -> Self {
        RpcFailure::new(tool_error_to_json_rpc_code(&e), e.to_string())
    }
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    /// Serve JSON-RPC over any line-oriented reader and writer
    ///
    /// Returns once the reader reaches end of input.
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut reader = BufReader::new(reader);
        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let mut payload = serde_json::to_vec(&response)?;
                        payload.push(b'\n');

                        writer.write_all(&payload).await?;
                        writer.flush().await?;

                        debug!("Sent response for id {}", response.id);
                    }
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let raw: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected malformed JSON-RPC request: {}", e);
                let id = raw.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request)
    }

    /// Handle a JSON-RPC request, returning nothing for notifications
    fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let JsonRpcRequest { id, method, params, .. } = request;

        let outcome = match method.as_str() {
            "initialize" => self.handle_initialize(params),
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                debug!("Client finished initialization");
                Ok(Value::Null)
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tools_call(params),
            _ => Err(RpcFailure::new(
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", method),
            )),
        };

        let Some(id) = id else {
            if let Err(failure) = outcome {
                debug!("Dropped failed notification '{}': {}", method, failure.message);
            }
            return None;
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(failure) => JsonRpcResponse::error(id, failure.code, failure.message, None),
        })
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, params: Option<Value>) -> Result<Value, RpcFailure> {
        let params: InitializeParams = params
            .map(serde_json::from_value::<InitializeParams>)
            .transpose()
            .map_err(|e| RpcFailure::new(error_codes::INVALID_PARAMS, format!("Invalid parameters: {}", e)))?
            .unwrap_or_default();

        match &params.client_info {
            Some(client) => info!(
                "MCP client connected: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            ),
            None => info!("MCP client connected"),
        }
        if let Some(version) = &params.protocol_version {
            debug!("Client protocol version: {}", version);
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Habit Streak MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_result(&result)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Value {
        let tools = vec![
            tool_definition::<tools::ListHabitsParams>(
                "habit_list",
                "List all habits with their streaks and weekly progress, plus an overview",
            ),
            tool_definition::<tools::GetHabitParams>(
                "habit_get",
                "Get one habit with its current and longest streak",
            ),
            tool_definition::<tools::CreateHabitParams>(
                "habit_create",
                "Create a new daily or weekly habit to track",
            ),
            tool_definition::<tools::UpdateHabitParams>(
                "habit_update",
                "Replace a habit's name, description and frequency",
            ),
            tool_definition::<tools::DeleteHabitParams>(
                "habit_delete",
                "Delete a habit together with its completion history",
            ),
            tool_definition::<tools::ToggleHabitParams>(
                "habit_toggle",
                "Mark a habit done for today, or undo today's completion. Only today's date is \
                 flipped: for weekly habits, completions on other days of the week are kept",
            ),
        ];

        json!({ "tools": tools })
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, params: Option<Value>) -> Result<Value, RpcFailure> {
        let params = params.ok_or_else(|| RpcFailure::new(error_codes::INVALID_PARAMS, "Missing parameters"))?;
        let call: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| RpcFailure::new(error_codes::INVALID_PARAMS, format!("Invalid parameters: {}", e)))?;

        if !self.initialized {
            debug!("Tool '{}' called before initialization finished", call.name);
        }

        let storage = self.habit_tracker.storage();
        let today = self.habit_tracker.today();
        let args = Value::Object(call.arguments.into_iter().collect());

        let text = match call.name.as_str() {
            "habit_list" => render(tools::list_habits(storage, parse_args(args)?, today)?)?,
            "habit_get" => render(tools::get_habit(storage, parse_args(args)?, today)?)?,
            "habit_create" => render(tools::create_habit(storage, parse_args(args)?, today)?)?,
            "habit_update" => render(tools::update_habit(storage, parse_args(args)?, today)?)?,
            "habit_delete" => render(tools::delete_habit(storage, parse_args(args)?)?)?,
            "habit_toggle" => render(tools::toggle_habit(storage, parse_args(args)?, today)?)?,
            other => {
                return Err(RpcFailure::new(
                    error_codes::METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", other),
                ))
            }
        };

        to_result(&ToolCallResult::success(text))
    }
}

/// Describe a tool, deriving its input schema from the parameter type
fn tool_definition<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let input_schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|e| {
        warn!("Could not serialize input schema for {}: {}", name, e);
        json!({ "type": "object" })
    });

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Decode tool arguments into the tool's parameter struct
fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

/// Render a tool response as the JSON text payload of a tool result
fn render<T: Serialize>(response: T) -> Result<String, RpcFailure> {
    serde_json::to_string_pretty(&response).map_err(|e| {
        error!("Failed to serialize tool response: {}", e);
        RpcFailure::new(error_codes::INTERNAL_ERROR, format!("Serialization failed: {}", e))
    })
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, RpcFailure> {
    serde_json::to_value(value)
        .map_err(|e| RpcFailure::new(error_codes::INTERNAL_ERROR, format!("Serialization failed: {}", e)))
}
