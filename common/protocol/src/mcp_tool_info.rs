//! Metadata for MCP server tools, kept separate from the executable
//! registration so a registry can answer "what tools does this server
//! offer" without holding a handler for each one.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// One tool advertised by an MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolInfo {
    /// Name of the server that advertised this tool.
    pub server: String,
    /// Tool name as advertised by the server (unprefixed).
    pub name: String,
    /// Tool description, if the server provided one.
    pub description: Option<String>,
    /// JSON schema for the tool's input.
    pub input_schema: Value,
}

/// Tuning for whether MCP tool definitions should be deferred behind an
/// auto-search tool instead of listed directly, based on how much of the
/// context window their descriptions would consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McpAutoSearchConfig {
    /// Fraction of the context window descriptions may consume before
    /// auto-search kicks in.
    pub threshold_ratio: f64,
    /// Estimated characters per token, for converting the token-based
    /// context window into a character budget.
    pub chars_per_token: f64,
}

impl McpAutoSearchConfig {
    /// The character budget for MCP tool descriptions given a context window.
    pub fn threshold_chars(&self, context_window: i64) -> f64 {
        context_window as f64 * self.threshold_ratio * self.chars_per_token
    }
}

impl Default for McpAutoSearchConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.1,
            chars_per_token: 2.5,
        }
    }
}

#[cfg(test)]
#[path = "mcp_tool_info.test.rs"]
mod tests;
