//! Tool registry (C4): where tools register themselves and where the turn
//! engine looks one up by name to execute it.
//!
//! Holds two kinds of entries side by side:
//! - Built-in and MCP tools with a live [`Tool`] handler, executable via
//!   [`ToolRegistry::get`].
//! - MCP tool metadata ([`McpToolInfo`]) registered without a handler, used
//!   to decide whether MCP descriptions should be deferred behind an
//!   auto-search tool before the model ever sees them.

use std::collections::BTreeMap;
use std::sync::Arc;

use turnkit_protocol::Features;
use turnkit_protocol::McpAutoSearchConfig;
use turnkit_protocol::McpToolInfo;
use turnkit_provider::ToolDefinition;

use crate::tool::Tool;

/// Registers and looks up executable tools and MCP tool metadata.
///
/// Registration is last-write-wins per name: a duplicate `register` call
/// for a name already present replaces the previous handler rather than
/// being rejected, matching how a session re-registers its built-ins on
/// every turn.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
    /// MCP tool metadata keyed by `mcp__{server}_{name}`, retained even
    /// after [`Self::defer_mcp_tool_definitions`] removes the executable
    /// entry, so [`Self::is_mcp_tool`] still recognizes the id.
    mcp_tools: BTreeMap<String, McpToolInfo>,
}

/// Builds the qualified id the registry uses for an MCP server's tool.
pub fn mcp_tool_id(server: &str, name: &str) -> String {
    format!("mcp__{server}_{name}")
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Register a tool under an additional alias, as well as its own name.
    ///
    /// Used for tools invoked under more than one name (e.g. an internal
    /// `read_file` handler also exposed to the model as `Read`).
    pub fn register_with_alias(&mut self, tool: impl Tool + 'static, alias: impl Into<String>) {
        let name = tool.name().to_string();
        let handler: Arc<dyn Tool> = Arc::new(tool);
        self.tools.insert(alias.into(), handler.clone());
        self.tools.insert(name, handler);
    }

    /// Check whether a tool is registered (executable) under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Look up a tool's handler by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Register metadata (and an executable id) for every tool an MCP
    /// server advertised. Callers that also want the tool executable must
    /// separately `register` a handler under [`mcp_tool_id`].
    pub fn register_mcp_server(&mut self, server: &str, tools: Vec<McpToolInfo>) {
        for mut info in tools {
            info.server = server.to_string();
            let id = mcp_tool_id(server, &info.name);
            self.mcp_tools.insert(id, info);
        }
    }

    /// Remove all metadata (and any executable registration) for `server`.
    pub fn unregister_mcp_server(&mut self, server: &str) {
        let prefix = format!("mcp__{server}_");
        self.mcp_tools.retain(|id, _| !id.starts_with(&prefix));
        self.tools.retain(|id, _| !id.starts_with(&prefix));
    }

    /// Whether `name` is a known MCP tool id, executable or deferred.
    pub fn is_mcp_tool(&self, name: &str) -> bool {
        self.mcp_tools.contains_key(name)
    }

    /// Total character count across all registered MCP tool descriptions,
    /// used to decide whether to defer them behind auto-search.
    pub fn mcp_description_chars(&self) -> usize {
        self.mcp_tools
            .values()
            .map(|info| info.description.as_deref().map_or(0, str::len))
            .sum()
    }

    /// Whether MCP tool descriptions exceed the configured share of the
    /// context window and should be deferred behind an auto-search tool.
    pub fn should_enable_auto_search(
        &self,
        context_window: i64,
        config: &McpAutoSearchConfig,
    ) -> bool {
        self.mcp_description_chars() as f64 >= config.threshold_chars(context_window)
    }

    /// Snapshot of every registered MCP tool's metadata.
    pub fn mcp_tool_snapshot(&self) -> Vec<McpToolInfo> {
        self.mcp_tools.values().cloned().collect()
    }

    /// Remove the executable registration for every MCP tool, keeping
    /// their metadata, and return the ids removed. Used when auto-search
    /// is enabled: the model no longer sees these as direct tool
    /// definitions, but [`Self::is_mcp_tool`] still recognizes them so the
    /// auto-search tool can resolve a chosen id back to a handler.
    pub fn defer_mcp_tool_definitions(&mut self) -> Vec<String> {
        let ids: Vec<String> = self.mcp_tools.keys().cloned().collect();
        for id in &ids {
            self.tools.remove(id);
        }
        ids
    }

    /// All registered tools' definitions, unfiltered.
    pub fn all_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// Registered tool names, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Definitions for tools whose [`Tool::feature_gate`] (if any) is
    /// enabled in `features`.
    pub fn definitions_filtered(&self, features: &Features) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .filter(|t| t.feature_gate().is_none_or(|f| features.enabled(f)))
            .map(|t| t.to_definition())
            .collect()
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
