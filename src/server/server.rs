use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{log_requests, metrics, state::*, RequestsLoggingLevel, ServerConfig};
use crate::mcp;
use crate::statbank::{
    DataFormat, DataQuery, Lang, StatbankClient, StatbankError, SubjectsQuery, TablesQuery,
    TimeOrder, ValuePresentation, VariableSelection,
};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub upstream: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
        upstream: state.statbank.base_url().to_string(),
    };
    Json(stats)
}

impl IntoResponse for StatbankError {
    fn into_response(self) -> Response {
        match self {
            StatbankError::UpstreamClient {
                status,
                content_type,
                body,
            }
            | StatbankError::UpstreamServer {
                status,
                content_type,
                body,
            } => {
                // Surface the upstream diagnostics unmodified
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let mut builder = Response::builder().status(status);
                if let Some(content_type) = content_type {
                    builder = builder.header(header::CONTENT_TYPE, content_type);
                }
                match builder.body(Body::from(body)) {
                    Ok(response) => response,
                    Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                }
            }
            StatbankError::InvalidParameter(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message })),
            )
                .into_response(),
            err @ (StatbankError::Transport(_) | StatbankError::Decode(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": err.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Comma-separated codes in a query param, e.g. `subjects=02,2401`.
fn split_codes(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SubjectsParams {
    subjects: Option<String>,
    #[serde(default)]
    include_tables: bool,
    #[serde(default)]
    recursive: bool,
    #[serde(default)]
    omit_inactive_subjects: bool,
    #[serde(default)]
    lang: Lang,
}

#[derive(Deserialize, Debug)]
struct LangParams {
    #[serde(default)]
    lang: Lang,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TablesParams {
    subjects: Option<String>,
    pastdays: Option<u32>,
    #[serde(default)]
    include_inactive: bool,
    #[serde(default)]
    lang: Lang,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DataParams {
    #[serde(default)]
    format: DataFormat,
    time_order: Option<TimeOrder>,
    #[serde(default)]
    lang: Lang,
    value_presentation: Option<ValuePresentation>,
}

#[derive(Deserialize, Debug, Default)]
struct DataBody {
    #[serde(default)]
    variables: Vec<VariableSelection>,
}

async fn get_subjects(
    State(statbank): State<GuardedStatbankClient>,
    Query(params): Query<SubjectsParams>,
) -> Response {
    let query = SubjectsQuery {
        subjects: split_codes(&params.subjects),
        include_tables: params.include_tables,
        recursive: params.recursive,
        omit_inactive_subjects: params.omit_inactive_subjects,
        lang: params.lang,
    };
    match statbank.subjects(&query).await {
        Ok(hierarchy) => Json(hierarchy).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_subject(
    State(statbank): State<GuardedStatbankClient>,
    Path(subject_id): Path<String>,
    Query(params): Query<LangParams>,
) -> Response {
    match statbank.subject(&subject_id, params.lang).await {
        Ok(Some(subject)) => Json(subject).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Subject not found: {}", subject_id) })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_tables(
    State(statbank): State<GuardedStatbankClient>,
    Query(params): Query<TablesParams>,
) -> Response {
    let query = TablesQuery {
        subjects: split_codes(&params.subjects),
        pastdays: params.pastdays,
        include_inactive: params.include_inactive,
        lang: params.lang,
    };
    match statbank.tables(&query).await {
        Ok(tables) => Json(tables).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_table_info(
    State(statbank): State<GuardedStatbankClient>,
    Path(table_id): Path<String>,
    Query(params): Query<LangParams>,
) -> Response {
    match statbank.table_info(&table_id, params.lang).await {
        Ok(info) => Json(info).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn post_data(
    State(statbank): State<GuardedStatbankClient>,
    Path(table_id): Path<String>,
    Query(params): Query<DataParams>,
    body: Bytes,
) -> Response {
    // An absent body selects all values, like an empty variable list
    let body: DataBody = if body.is_empty() {
        DataBody::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(body) => body,
            Err(err) => {
                return StatbankError::InvalidParameter(format!(
                    "malformed request body: {}",
                    err
                ))
                .into_response()
            }
        }
    };
    let query = DataQuery {
        variables: body.variables,
        format: params.format,
        time_order: params.time_order,
        lang: params.lang,
        value_presentation: params.value_presentation,
    };
    match statbank.data(&table_id, &query).await {
        Ok(payload) => {
            let mut builder = Response::builder().status(StatusCode::OK);
            if let Some(content_type) = payload.content_type {
                builder = builder.header(header::CONTENT_TYPE, content_type);
            }
            match builder.body(Body::from(payload.body)) {
                Ok(response) => response,
                Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            }
        }
        Err(err) => err.into_response(),
    }
}

pub fn make_app(config: ServerConfig, statbank: Arc<StatbankClient>) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        statbank,
        mcp_state: Arc::new(mcp::handler::create_mcp_state()),
    };

    let statbank_routes: Router = Router::new()
        .route("/subjects", get(get_subjects))
        .route("/subjects/{subject_id}", get(get_subject))
        .route("/tables", get(get_tables))
        .route("/tableinfo/{table_id}", get(get_table_info))
        .route("/data/{table_id}", post(post_data))
        .with_state(state.clone());

    let mcp_routes: Router = Router::new()
        .route("/mcp", get(mcp::mcp_handler))
        .with_state(state.clone());

    let app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/statbank", statbank_routes)
        .nest("/v1", mcp_routes);

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    statbank: Arc<StatbankClient>,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    metrics_port: u16,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
    };
    let app = make_app(config, statbank);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    let metrics_app: Router = Router::new().route("/metrics", get(metrics::metrics_handler));
    let metrics_listener =
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port)).await?;

    tokio::try_join!(
        async { axum::serve(listener, app).await.map_err(anyhow::Error::from) },
        async {
            axum::serve(metrics_listener, metrics_app)
                .await
                .map_err(anyhow::Error::from)
        },
    )?;

    Ok(())
}
