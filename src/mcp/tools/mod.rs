//! MCP Tools
//!
//! One tool per Statistikbank operation.

pub mod statbank;

use super::registry::McpRegistry;

/// Register all tools with the registry
pub fn register_all_tools(registry: &mut McpRegistry) {
    statbank::register_tools(registry);
}
