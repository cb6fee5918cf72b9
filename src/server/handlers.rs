//! MCP tool handlers for the identity server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::domain::{compute_check_digit, format_rut, validate_rut};
use crate::error::RegistrationError;
use crate::models::NewUser;
use crate::observability::MetricsTracker;
use crate::services::RegistrationService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing RUT utilities and account registration.
#[derive(Clone)]
pub struct IdentityMcpServer {
    registration_service: Arc<dyn RegistrationService>,
    metrics: MetricsTracker,
    server_name: String,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for IdentityMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: self.server_name.clone(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("PoloMarket identity server - validates and formats Chilean RUTs and registers marketplace accounts.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RutParams {
    /// RUT in any punctuation style, e.g. "12.345.678-5"
    rut: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CheckDigitParams {
    /// RUT body digits without the check character
    body: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RegisterUserParams {
    username: String,
    email: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    rut: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListUsersParams {
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(message: impl Into<Cow<'static, str>>) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: message.into(),
        data: None,
    }
}

fn registration_to_mcp_error(e: RegistrationError) -> McpError {
    if e.is_client_error() {
        invalid_params(e.to_string())
    } else {
        tracing::error!("Registration storage failure: {:?}", e);
        to_mcp_error(e)
    }
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

#[tool_router]
impl IdentityMcpServer {
    /// Create a new identity MCP server.
    pub fn new(
        registration_service: Arc<dyn RegistrationService>,
        metrics: MetricsTracker,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            registration_service,
            metrics,
            server_name: server_name.into(),
            tool_router: Self::tool_router(),
        }
    }

    /// Counters shared with the registration service.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// Check a RUT's shape and Module 11 check digit.
    #[tool(
        description = "Validate a Chilean RUT (e.g. 12.345.678-5, 12345678-5 or 123456785). Returns whether the check digit matches, plus the canonical formatted form."
    )]
    async fn validate_rut(
        &self,
        params: Parameters<RutParams>,
    ) -> Result<CallToolResult, McpError> {
        let rut = params.0.rut;
        let valid = validate_rut(&rut);
        self.metrics.track_rut_validation(valid);

        tracing::debug!(valid = valid, "MCP Handler: validate_rut");

        json_result(&serde_json::json!({
            "rut": rut,
            "valid": valid,
            "formatted": format_rut(&rut),
        }))
    }

    /// Format a RUT for display without validating it.
    #[tool(
        description = "Format a RUT as XX.XXX.XXX-C. Does not validate: malformed input is formatted as-is."
    )]
    async fn format_rut(&self, params: Parameters<RutParams>) -> Result<CallToolResult, McpError> {
        let rut = params.0.rut;

        json_result(&serde_json::json!({
            "input": rut,
            "formatted": format_rut(&rut),
        }))
    }

    /// Compute the check character for a RUT body.
    #[tool(description = "Compute the Module 11 check character (0-9 or K) for a RUT body of digits")]
    async fn compute_rut_check_digit(
        &self,
        params: Parameters<CheckDigitParams>,
    ) -> Result<CallToolResult, McpError> {
        let body = params.0.body;
        let check = compute_check_digit(&body)
            .ok_or_else(|| invalid_params("RUT body must be one or more digits"))?;

        json_result(&serde_json::json!({
            "body": body,
            "check_digit": check.to_string(),
            "formatted": format_rut(&format!("{}{}", body, check)),
        }))
    }

    /// Register a new marketplace account.
    #[tool(
        description = "Register a PoloMarket account. The optional RUT is validated before any uniqueness check; an invalid or already-registered RUT is rejected."
    )]
    async fn register_user(
        &self,
        params: Parameters<RegisterUserParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: register_user called");

        let user = self
            .registration_service
            .register(NewUser {
                username: params.username,
                email: params.email,
                full_name: params.full_name,
                rut: params.rut,
            })
            .await
            .map_err(registration_to_mcp_error)?;

        json_result(&serde_json::to_value(&user).map_err(to_mcp_error)?)
    }

    /// Look up the account holding a RUT.
    #[tool(description = "Find the registered account holding a RUT, in any punctuation style")]
    async fn find_user_by_rut(
        &self,
        params: Parameters<RutParams>,
    ) -> Result<CallToolResult, McpError> {
        let user = self
            .registration_service
            .lookup_by_rut(&params.0.rut)
            .await
            .map_err(registration_to_mcp_error)?;

        json_result(&serde_json::json!({
            "found": user.is_some(),
            "user": user,
        }))
    }

    /// List registered accounts.
    #[tool(description = "List registered accounts ordered by ID, with optional limit and offset")]
    async fn list_users(
        &self,
        params: Parameters<ListUsersParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let users = self
            .registration_service
            .list_users(params.limit, params.offset.unwrap_or(0))
            .await
            .map_err(registration_to_mcp_error)?;

        json_result(&serde_json::json!({
            "count": users.len(),
            "users": users,
        }))
    }
}
