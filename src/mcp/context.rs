//! MCP Tool Execution Context
//!
//! Provides access to server state for tool implementations.

use std::sync::Arc;
use std::time::Instant;

use crate::server::ServerConfig;
use crate::statbank::StatbankClient;

/// Context provided to tool and resource handlers during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Access to the upstream Statistikbank API
    pub statbank: Arc<StatbankClient>,

    /// Server configuration
    pub config: ServerConfig,

    /// Server version info
    pub server_version: String,

    /// Server start time (for uptime calculation)
    pub start_time: Instant,
}
