//! Common test utilities: an in-process mock Model Factory service

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Scripted behavior and recorded observations of the mock factory
pub struct FactoryInner {
    /// Number of submissions received
    pub submit_count: usize,
    /// Number of summary requests received
    pub poll_count: usize,
    /// Status reported per summary request; the last entry repeats
    pub statuses: Vec<String>,
    /// Form fields of the last submission
    pub fields: Vec<(String, String)>,
    /// File part names of the last submission
    pub file_parts: Vec<String>,
    /// HTTP status to answer submissions with
    pub submit_http_status: u16,
    /// Job id to hand out (None simulates a malformed response)
    pub job_id: Option<String>,
    /// Summary body attached once the job reaches DONE
    pub summary: Value,
    /// Log text, if "available" yet
    pub logs: Option<String>,
}

impl Default for FactoryInner {
    fn default() -> Self {
        Self {
            submit_count: 0,
            poll_count: 0,
            statuses: vec![
                "INITIALIZING".to_string(),
                "EXECUTING".to_string(),
                "DONE".to_string(),
            ],
            fields: Vec::new(),
            file_parts: Vec::new(),
            submit_http_status: 200,
            job_id: Some("abc".to_string()),
            summary: json!({
                "performance_dictionary": {
                    "modelA": {
                        "model_uri": "s3://models/m.onnx",
                        "performance": {
                            "test": {
                                "r2_score": 0.91,
                                "rmse": 0.42,
                                "coverage": 0.95,
                                "mean_interval_width": 1.2,
                                "median_interval_width": 1.1
                            }
                        }
                    }
                }
            }),
            logs: None,
        }
    }
}

#[derive(Clone)]
pub struct FactoryState(pub Arc<Mutex<FactoryInner>>);

impl FactoryState {
    pub fn new(inner: FactoryInner) -> Self {
        Self(Arc::new(Mutex::new(inner)))
    }
}

async fn handle_submit(State(state): State<FactoryState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut fields = Vec::new();
    let mut file_parts = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart read") {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_some() {
            file_parts.push(name);
            // Drain the part so the stream stays valid
            let _ = field.bytes().await.expect("part bytes");
        } else {
            let value = field.text().await.expect("field text");
            fields.push((name, value));
        }
    }

    let mut inner = state.0.lock().unwrap();
    inner.submit_count += 1;
    inner.fields = fields;
    inner.file_parts = file_parts;

    if inner.submit_http_status != 200 {
        return (
            StatusCode::from_u16(inner.submit_http_status).unwrap(),
            Json(json!({"message": "recipe execution could not be started"})),
        );
    }

    let body = match &inner.job_id {
        Some(id) => json!({"job_id": id, "status": "INITIALIZING", "message": "job accepted"}),
        None => json!({"message": "job accepted"}),
    };
    (StatusCode::OK, Json(body))
}

async fn handle_summary(
    State(state): State<FactoryState>,
    Path(job_id): Path<String>,
) -> Json<Value> {
    let mut inner = state.0.lock().unwrap();
    let index = inner.poll_count.min(inner.statuses.len() - 1);
    let status = inner.statuses[index].clone();
    inner.poll_count += 1;

    let mut body = json!({"job_id": job_id, "status": status});
    if status == "DONE" {
        body["summary"] = inner.summary.clone();
    }
    Json(body)
}

async fn handle_log(
    State(state): State<FactoryState>,
    Path(_job_id): Path<String>,
) -> Json<Value> {
    let inner = state.0.lock().unwrap();
    match &inner.logs {
        Some(logs) => Json(json!({"logs": logs})),
        None => Json(json!({"status": "INITIALIZING"})),
    }
}

/// Start the mock factory on an ephemeral port; returns its base URL
pub async fn spawn_factory(state: FactoryState) -> String {
    let app = Router::new()
        .route("/recipe/supervised-anomaly", post(handle_submit))
        .route("/deployment/monitor/device/create", post(handle_submit))
        .route("/deployment/monitor/model/create", post(handle_submit))
        .route("/summary/{job_id}", get(handle_summary))
        .route("/log/{job_id}", get(handle_log))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock factory");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock factory");
    });

    format!("http://{}", addr)
}

/// Service config pointed at the mock factory, polling as fast as possible
pub fn test_service_config(base_url: &str) -> mfctl::models::ServiceConfig {
    let mut config = mfctl::models::ServiceConfig::default();
    config.endpoint_url = base_url.to_string();
    config.polling.interval_seconds = 0;
    config
}

/// KPI spec matching the wind-turbine fixture dataset
pub fn test_kpi_spec() -> mfctl::models::KpiSpec {
    serde_yaml::from_str(
        r#"
device_name: WindTurbine
device_description: Wind turbine gearbox monitor
dataset_file: turbine.csv
assetid_column: asset_id
timestamp_column: Timestamp
feature_columns: [P_avg, Gb1t_avg, Gb2t_avg, Ws_avg]
target_columns: [Rs_avg]
"#,
    )
    .expect("parse test kpi spec")
}
