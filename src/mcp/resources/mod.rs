//! MCP Resources
//!
//! Read-only `statbank://` URIs mirroring the tool operations.

pub mod statbank;

use super::registry::McpRegistry;

/// Register all resources with the registry
pub fn register_all_resources(registry: &mut McpRegistry) {
    statbank::register_resources(registry);
}
