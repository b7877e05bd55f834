//! Mock Statistikbank upstream
//!
//! A small axum app that emulates the four upstream endpoints from fixture
//! data. Responses are a pure function of the request payload, so repeated
//! identical requests produce byte-identical bodies.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::constants::*;
use super::fixtures::{fixture_subjects, fixture_tableinfo, fixture_tables, fixture_variables};

/// Leading bytes of the fake XLSX payload (ZIP magic)
pub const XLSX_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Mock upstream instance bound to a random port
///
/// When dropped, the server shuts down.
pub struct MockUpstream {
    pub base_url: String,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn spawn() -> Self {
        let app = Router::new()
            .route("/subjects", post(subjects))
            .route("/tables", post(tables))
            .route("/tableinfo", post(tableinfo))
            .route("/data", post(data));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock upstream failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn error_response(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response()
}

fn requested_codes(payload: &Value, key: &str) -> Vec<String> {
    payload[key]
        .as_array()
        .map(|codes| {
            codes
                .iter()
                .filter_map(|c| c.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

async fn subjects(Json(payload): Json<Value>) -> Response {
    let lang = payload["lang"].as_str().unwrap_or("da");
    let requested = requested_codes(&payload, "subjects");

    let mut all = fixture_subjects(lang);
    if !requested.is_empty() {
        all.retain(|subject| {
            subject["id"]
                .as_str()
                .map(|id| requested.iter().any(|r| r.eq_ignore_ascii_case(id)))
                .unwrap_or(false)
        });
    }

    Json(Value::Array(all)).into_response()
}

async fn tables(Json(payload): Json<Value>) -> Response {
    let include_inactive = payload["includeInactive"].as_bool().unwrap_or(false);
    let pastdays = payload["pastdays"].as_u64();

    Json(Value::Array(fixture_tables(include_inactive, pastdays))).into_response()
}

async fn tableinfo(Json(payload): Json<Value>) -> Response {
    let table = payload["table"].as_str().unwrap_or_default();
    if !table.eq_ignore_ascii_case(TABLE_ID) {
        return error_response(StatusCode::NOT_FOUND, UNKNOWN_TABLE_BODY);
    }

    Json(fixture_tableinfo()).into_response()
}

/// Expand the payload's variable selections against the fixture catalog.
///
/// Missing variables select all values; `"*"` selects all values; any other
/// unknown code is rejected the way the real upstream rejects it.
fn expand_selection(payload: &Value) -> Result<Vec<Vec<String>>, Response> {
    let mut expanded = Vec::new();

    for (code, all_values) in fixture_variables() {
        let selection = payload["variables"].as_array().and_then(|vars| {
            vars.iter().find(|v| {
                v["code"]
                    .as_str()
                    .map(|c| c.eq_ignore_ascii_case(code))
                    .unwrap_or(false)
            })
        });

        let values: Vec<String> = match selection {
            None => all_values.iter().map(|v| v.to_string()).collect(),
            Some(sel) => {
                let requested: Vec<String> = sel["values"]
                    .as_array()
                    .map(|vals| {
                        vals.iter()
                            .map(|v| match v {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                if requested.iter().any(|v| v == "*") {
                    all_values.iter().map(|v| v.to_string()).collect()
                } else {
                    for value in &requested {
                        if !all_values.contains(&value.as_str()) {
                            return Err(error_response(StatusCode::BAD_REQUEST, INVALID_CODE_BODY));
                        }
                    }
                    requested
                }
            }
        };

        expanded.push(values);
    }

    Ok(expanded)
}

async fn data(Json(payload): Json<Value>) -> Response {
    let table = payload["table"].as_str().unwrap_or_default();
    if !table.eq_ignore_ascii_case(TABLE_ID) {
        return error_response(StatusCode::NOT_FOUND, UNKNOWN_TABLE_BODY);
    }

    let expanded = match expand_selection(&payload) {
        Ok(expanded) => expanded,
        Err(response) => return response,
    };
    let regions = &expanded[0];
    let quarters = &expanded[1];
    let cells = regions.len() * quarters.len();

    match payload["format"].as_str().unwrap_or("JSONSTAT") {
        "CSV" => {
            let mut csv = format!("{};{};INDHOLD\n", VARIABLE_1_CODE, VARIABLE_2_CODE);
            let mut index = 0;
            for region in regions {
                for quarter in quarters {
                    csv.push_str(&format!("{};{};{}\n", region, quarter, index));
                    index += 1;
                }
            }
            (
                [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
                csv,
            )
                .into_response()
        }
        "XLSX" => {
            let mut body = XLSX_MAGIC.to_vec();
            body.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
            ([(header::CONTENT_TYPE, XLSX_CONTENT_TYPE)], body).into_response()
        }
        _ => Json(json!({
            "dataset": {
                "dimension": {
                    "id": [VARIABLE_1_CODE, VARIABLE_2_CODE],
                    "size": [regions.len(), quarters.len()],
                },
                "value": (0..cells).collect::<Vec<usize>>(),
            }
        }))
        .into_response(),
    }
}
