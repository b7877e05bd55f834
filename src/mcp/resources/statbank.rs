//! Statbank Resources
//!
//! `statbank://` URIs giving read-only access to the same operations the
//! tools expose, with default parameters.

use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ResourceContent};
use crate::mcp::registry::{McpRegistry, RegisteredResource, ResourceBuilder, ResourceResult};
use crate::statbank::{DataQuery, Lang, SubjectsQuery, TablesQuery};

use super::super::tools::statbank::{is_text_payload, upstream_error};

/// Register statbank resources with the registry
pub fn register_resources(registry: &mut McpRegistry) {
    registry.register_resource(subjects_resource());
    registry.register_resource(subject_by_id_resource());
    registry.register_resource(tables_resource());
    registry.register_resource(tableinfo_resource());
    registry.register_resource(data_resource());
}

fn json_content(uri: String, value: &serde_json::Value) -> ResourceResult {
    Ok(vec![ResourceContent::Text {
        uri,
        mime_type: Some("application/json".to_string()),
        text: serde_json::to_string_pretty(value)
            .map_err(|e| McpError::InternalError(e.to_string()))?,
    }])
}

/// Extract the trailing id from a URI like "statbank://tableinfo/folk1c"
fn extract_id(uri: &str, prefix: &str) -> Option<String> {
    let stripped = uri.strip_prefix(prefix)?;
    if stripped.is_empty() || stripped.contains('/') {
        None
    } else {
        Some(stripped.to_string())
    }
}

// ============================================================================
// statbank://subjects
// ============================================================================

fn subjects_resource() -> RegisteredResource {
    ResourceBuilder::new("statbank://subjects", "Subject hierarchy")
        .description("Root subjects of the Statistikbank classification")
        .mime_type("application/json")
        .build(subjects_handler)
}

async fn subjects_handler(ctx: ToolContext, uri: String) -> ResourceResult {
    let hierarchy = ctx
        .statbank
        .subjects(&SubjectsQuery::default())
        .await
        .map_err(upstream_error)?;

    json_content(uri, &hierarchy)
}

// ============================================================================
// statbank://subjects/{subject_id}
// ============================================================================

fn subject_by_id_resource() -> RegisteredResource {
    ResourceBuilder::new("statbank://subjects/{subject_id}", "Subject")
        .description("A single subject and its sub-subjects")
        .mime_type("application/json")
        .build(subject_by_id_handler)
}

async fn subject_by_id_handler(ctx: ToolContext, uri: String) -> ResourceResult {
    let subject_id = extract_id(&uri, "statbank://subjects/")
        .ok_or_else(|| McpError::InvalidParams(format!("Invalid subject URI: {}", uri)))?;

    let subject = ctx
        .statbank
        .subject(&subject_id, Lang::default())
        .await
        .map_err(upstream_error)?
        .ok_or_else(|| McpError::ResourceNotFound(uri.clone()))?;

    json_content(uri, &subject)
}

// ============================================================================
// statbank://tables
// ============================================================================

fn tables_resource() -> RegisteredResource {
    ResourceBuilder::new("statbank://tables", "Tables")
        .description("All statistical tables")
        .mime_type("application/json")
        .build(tables_handler)
}

async fn tables_handler(ctx: ToolContext, uri: String) -> ResourceResult {
    let tables = ctx
        .statbank
        .tables(&TablesQuery::default())
        .await
        .map_err(upstream_error)?;

    json_content(uri, &tables)
}

// ============================================================================
// statbank://tableinfo/{table_id}
// ============================================================================

fn tableinfo_resource() -> RegisteredResource {
    ResourceBuilder::new("statbank://tableinfo/{table_id}", "Table metadata")
        .description("Variables and valid value codes for a table")
        .mime_type("application/json")
        .build(tableinfo_handler)
}

async fn tableinfo_handler(ctx: ToolContext, uri: String) -> ResourceResult {
    let table_id = extract_id(&uri, "statbank://tableinfo/")
        .ok_or_else(|| McpError::InvalidParams(format!("Invalid tableinfo URI: {}", uri)))?;

    let info = ctx
        .statbank
        .table_info(&table_id, Lang::default())
        .await
        .map_err(upstream_error)?;

    json_content(uri, &info)
}

// ============================================================================
// statbank://data/{table_id}
// ============================================================================

fn data_resource() -> RegisteredResource {
    ResourceBuilder::new("statbank://data/{table_id}", "Table data")
        .description("Full table data in the default format, with automatic elimination")
        .build(data_handler)
}

async fn data_handler(ctx: ToolContext, uri: String) -> ResourceResult {
    let table_id = extract_id(&uri, "statbank://data/")
        .ok_or_else(|| McpError::InvalidParams(format!("Invalid data URI: {}", uri)))?;

    let payload = ctx
        .statbank
        .data(&table_id, &DataQuery::default())
        .await
        .map_err(upstream_error)?;

    let content = if is_text_payload(payload.content_type.as_deref()) {
        ResourceContent::Text {
            uri,
            mime_type: payload.content_type,
            text: String::from_utf8_lossy(&payload.body).into_owned(),
        }
    } else {
        use base64::Engine;
        ResourceContent::Blob {
            uri,
            mime_type: payload.content_type,
            blob: base64::engine::general_purpose::STANDARD.encode(&payload.body),
        }
    };

    Ok(vec![content])
}
