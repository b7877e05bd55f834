//! Statbank Tools
//!
//! Tools forwarding to the Statistikbank endpoints. The recommended
//! workflow for an agent is subjects → tables → tableinfo → data, using
//! tableinfo's value-code catalog to build valid data selections.

use serde::Deserialize;
use serde_json::Value;

use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};
use crate::statbank::{
    DataFormat, DataQuery, Lang, StatbankError, SubjectsQuery, TablesQuery, TimeOrder,
    ValuePresentation, VariableSelection,
};

/// Register statbank tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(subjects_tool());
    registry.register_tool(tables_tool());
    registry.register_tool(tableinfo_tool());
    registry.register_tool(data_tool());
}

/// Map an adapter error onto an MCP error, keeping upstream diagnostics.
pub(crate) fn upstream_error(err: StatbankError) -> McpError {
    match &err {
        StatbankError::UpstreamClient { body, .. } | StatbankError::UpstreamServer { body, .. } => {
            McpError::ToolExecutionFailed(format!("{}: {}", err, body))
        }
        _ => McpError::ToolExecutionFailed(err.to_string()),
    }
}

fn json_result(value: &Value) -> ToolResult {
    ToolsCallResult::json(value).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// statbank.subjects
// ============================================================================

#[derive(Debug, Deserialize)]
struct SubjectsToolParams {
    #[serde(default)]
    subjects: Vec<String>,
    #[serde(default)]
    include_tables: bool,
    #[serde(default)]
    recursive: bool,
    #[serde(default)]
    omit_inactive_subjects: bool,
    #[serde(default)]
    lang: Lang,
}

fn subjects_tool() -> RegisteredTool {
    ToolBuilder::new("statbank.subjects")
        .description(
            "Browse the subject hierarchy of Danmarks Statistik. \
             Without arguments returns the root subjects; pass subject codes \
             to fetch their sub-subjects.",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "subjects": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Subject codes to fetch sub-subjects for"
                },
                "include_tables": {
                    "type": "boolean",
                    "description": "Include tables under each subject"
                },
                "recursive": {
                    "type": "boolean",
                    "description": "Descend through all levels of the hierarchy"
                },
                "omit_inactive_subjects": {
                    "type": "boolean",
                    "description": "Omit subjects that are no longer updated"
                },
                "lang": {
                    "type": "string",
                    "enum": ["da", "en"],
                    "description": "Language for titles (default da)"
                }
            }
        }))
        .build(subjects_handler)
}

async fn subjects_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SubjectsToolParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let query = SubjectsQuery {
        subjects: params.subjects,
        include_tables: params.include_tables,
        recursive: params.recursive,
        omit_inactive_subjects: params.omit_inactive_subjects,
        lang: params.lang,
    };

    let hierarchy = ctx.statbank.subjects(&query).await.map_err(upstream_error)?;

    json_result(&hierarchy)
}

// ============================================================================
// statbank.tables
// ============================================================================

#[derive(Debug, Deserialize)]
struct TablesToolParams {
    #[serde(default)]
    subjects: Vec<String>,
    pastdays: Option<u32>,
    #[serde(default)]
    include_inactive: bool,
    #[serde(default)]
    lang: Lang,
}

fn tables_tool() -> RegisteredTool {
    ToolBuilder::new("statbank.tables")
        .description(
            "List statistical tables, optionally filtered by subject codes \
             or by how recently they were updated.",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "subjects": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Subject codes to filter tables on"
                },
                "pastdays": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Only tables updated within this many days; 0 means today"
                },
                "include_inactive": {
                    "type": "boolean",
                    "description": "Include discontinued tables"
                },
                "lang": {
                    "type": "string",
                    "enum": ["da", "en"],
                    "description": "Language for titles (default da)"
                }
            }
        }))
        .build(tables_handler)
}

async fn tables_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: TablesToolParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let query = TablesQuery {
        subjects: params.subjects,
        pastdays: params.pastdays,
        include_inactive: params.include_inactive,
        lang: params.lang,
    };

    let tables = ctx.statbank.tables(&query).await.map_err(upstream_error)?;

    json_result(&tables)
}

// ============================================================================
// statbank.tableinfo
// ============================================================================

#[derive(Debug, Deserialize)]
struct TableInfoToolParams {
    table_id: String,
    #[serde(default)]
    lang: Lang,
}

fn tableinfo_tool() -> RegisteredTool {
    ToolBuilder::new("statbank.tableinfo")
        .description(
            "Get a table's metadata: its variables and their valid value \
             codes. Call this before statbank.data to learn which codes a \
             selection may use.",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "table_id": {
                    "type": "string",
                    "description": "Table code, e.g. \"folk1c\""
                },
                "lang": {
                    "type": "string",
                    "enum": ["da", "en"],
                    "description": "Language for metadata (default da)"
                }
            },
            "required": ["table_id"]
        }))
        .build(tableinfo_handler)
}

async fn tableinfo_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: TableInfoToolParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let info = ctx
        .statbank
        .table_info(&params.table_id, params.lang)
        .await
        .map_err(upstream_error)?;

    json_result(&info)
}

// ============================================================================
// statbank.data
// ============================================================================

#[derive(Debug, Deserialize)]
struct DataToolParams {
    table_id: String,
    #[serde(default)]
    variables: Vec<VariableSelection>,
    #[serde(default)]
    format: DataFormat,
    time_order: Option<TimeOrder>,
    #[serde(default)]
    lang: Lang,
    value_presentation: Option<ValuePresentation>,
}

fn data_tool() -> RegisteredTool {
    ToolBuilder::new("statbank.data")
        .description(
            "Fetch data from a table. Each variable selection pairs a \
             variable code with value codes from statbank.tableinfo; \"*\" \
             selects all values. Omitting variables fetches everything with \
             automatic elimination.",
        )
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "table_id": {
                    "type": "string",
                    "description": "Table code, e.g. \"folk1c\""
                },
                "variables": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "code": { "type": "string" },
                            "values": {
                                "type": "array",
                                "items": { "type": ["string", "integer"] }
                            }
                        },
                        "required": ["code", "values"]
                    },
                    "description": "Value selections per variable"
                },
                "format": {
                    "type": "string",
                    "enum": [
                        "JSONSTAT", "JSON", "CSV", "XLSX", "BULK", "PX", "TSV",
                        "HTML5", "HTML5InclNotes", "SDMXCOMPACT", "SDMXGENERIC"
                    ],
                    "description": "Output format (default JSONSTAT)"
                },
                "time_order": {
                    "type": "string",
                    "enum": ["Ascending", "Descending"],
                    "description": "Sort order for time series"
                },
                "lang": {
                    "type": "string",
                    "enum": ["da", "en"],
                    "description": "Language for metadata (default da)"
                },
                "value_presentation": {
                    "type": "string",
                    "enum": ["Code", "Text"],
                    "description": "Label cells by code or display text"
                }
            },
            "required": ["table_id"]
        }))
        .build(data_handler)
}

/// Whether an upstream payload can be relayed as text content.
pub(crate) fn is_text_payload(content_type: Option<&str>) -> bool {
    match content_type {
        Some(ct) => ct.starts_with("text/") || ct.contains("json") || ct.contains("xml"),
        None => false,
    }
}

async fn data_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: DataToolParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let query = DataQuery {
        variables: params.variables,
        format: params.format,
        time_order: params.time_order,
        lang: params.lang,
        value_presentation: params.value_presentation,
    };

    let payload = ctx
        .statbank
        .data(&params.table_id, &query)
        .await
        .map_err(upstream_error)?;

    if is_text_payload(payload.content_type.as_deref()) {
        Ok(ToolsCallResult::text(
            String::from_utf8_lossy(&payload.body).into_owned(),
        ))
    } else {
        // Binary formats (e.g. XLSX) are relayed base64-encoded
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&payload.body);
        json_result(&serde_json::json!({
            "encoding": "base64",
            "content_type": payload.content_type,
            "data": encoded,
        }))
    }
}
