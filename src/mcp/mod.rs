//! MCP (Model Context Protocol) Server
//!
//! Exposes the Statistikbank adapter to LLM clients as MCP tools and
//! resources. Tools cover the four upstream operations (subjects, tables,
//! tableinfo, data); resources mirror them as `statbank://` URIs.
//!
//! ## Architecture
//!
//! - Transport: WebSocket at `/v1/mcp`
//! - Auth: none; the upstream API is public
//! - Tools and resources are thin forwards to the Statbank client

pub mod context;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod resources;
pub mod tools;

pub use handler::mcp_handler;
pub use protocol::{McpError, McpRequest, McpResponse};
pub use registry::McpRegistry;
