//! MCP tools over stdio.
//!
//! An assistant drafting a post can ask how much room is left
//! (`measure_text`) and whether the draft may go out (`check_message`).
//! `get_info` reports the version and the weights in use. Every tool goes
//! through the same [`MessageValidator`] the CLI uses.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;
use tracing::{debug, info};

use tweetlen_core::{
    DEFAULT_MAX_INPUT_BYTES, DEFAULT_WARNING_THRESHOLD, EMOJI_WEIGHT, LengthReport, MAX_LENGTH,
    MessageValidator, URL_WEIGHT,
};

/// Arguments to `get_info`.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Return a JSON object instead of a sentence.
    #[serde(default)]
    pub json: bool,
}

/// Arguments to `measure_text`.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct MeasureTextParams {
    /// Draft to measure.
    pub text: String,
    /// Remaining count at or below which the status becomes "warning".
    pub warning_threshold: Option<usize>,
}

/// Arguments to `check_message`.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckMessageParams {
    /// Draft to check.
    pub text: String,
}

#[derive(Debug, Serialize)]
struct Weights {
    max_length: usize,
    url_weight: usize,
    emoji_weight: usize,
}

#[derive(Debug, Serialize)]
struct About {
    name: &'static str,
    version: &'static str,
    weights: Weights,
}

/// `check_message` answer: the verdict without the counter details.
#[derive(Debug, Serialize)]
struct CheckOutcome {
    can_send: bool,
    weighted_length: usize,
    remaining: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl From<LengthReport> for CheckOutcome {
    fn from(report: LengthReport) -> Self {
        Self {
            can_send: report.can_send,
            weighted_length: report.weighted_length,
            remaining: report.remaining,
            reason: report.reason,
        }
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("could not encode result: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Counter and validator exposed as MCP tools.
#[derive(Clone)]
pub struct CounterServer {
    tool_router: ToolRouter<Self>,
    validator: MessageValidator,
    max_input_bytes: Option<usize>,
    warning_threshold: usize,
}

impl Default for CounterServer {
    fn default() -> Self {
        Self::with_limits(Some(DEFAULT_MAX_INPUT_BYTES), DEFAULT_WARNING_THRESHOLD)
    }
}

#[tool_router]
impl CounterServer {
    /// `None` for `max_input_bytes` accepts drafts of any size.
    pub fn with_limits(max_input_bytes: Option<usize>, warning_threshold: usize) -> Self {
        Self {
            tool_router: Self::tool_router(),
            validator: MessageValidator::standard(),
            max_input_bytes,
            warning_threshold,
        }
    }

    fn admit(&self, tool: &'static str, text: &str) -> Result<(), McpError> {
        debug!(tool, bytes = text.len(), "tool called");
        match self.max_input_bytes {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    #[tool(description = "Report the server version and the weights used to count a post")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        let about = About {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            weights: Weights {
                max_length: MAX_LENGTH,
                url_weight: URL_WEIGHT,
                emoji_weight: EMOJI_WEIGHT,
            },
        };
        if params.json {
            return json_result(&about);
        }
        Ok(CallToolResult::success(vec![Content::text(format!(
            "{} {}: posts hold {MAX_LENGTH} weighted characters; a link costs {URL_WEIGHT} \
             and an emoji costs {EMOJI_WEIGHT}.",
            about.name, about.version,
        ))]))
    }

    #[tool(
        description = "Measure a draft: weighted length, remaining characters, URL and emoji counts, and whether the counter is ok, warning or over_limit."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn measure_text(
        &self,
        Parameters(params): Parameters<MeasureTextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.admit("measure_text", &params.text)?;
        let threshold = params.warning_threshold.unwrap_or(self.warning_threshold);
        let report = self.validator.report(&params.text, threshold);
        info!(
            tool = "measure_text",
            weighted_length = report.weighted_length,
            status = ?report.status,
            "measured"
        );
        json_result(&report)
    }

    #[tool(
        description = "Decide whether a draft can be posted. Blank drafts and drafts over 280 weighted characters are refused with a reason."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_message(
        &self,
        Parameters(params): Parameters<CheckMessageParams>,
    ) -> Result<CallToolResult, McpError> {
        self.admit("check_message", &params.text)?;
        let outcome =
            CheckOutcome::from(self.validator.report(&params.text, self.warning_threshold));
        info!(tool = "check_message", can_send = outcome.can_send, "checked");
        json_result(&outcome)
    }
}

#[tool_handler]
impl ServerHandler for CounterServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Weighted post length. Call measure_text while drafting and \
                 check_message before posting."
                    .to_string(),
            ),
        }
    }
}
