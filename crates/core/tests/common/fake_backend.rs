//! In-process generation backend served with axum on an ephemeral port.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub const VIDEO_BYTES: &[u8] = b"\x00\x00\x00\x18ftypmp42";

/// How the fake backend answers.
#[derive(Debug, Clone, Default)]
pub struct BackendBehavior {
    /// Pending answers before a job completes.
    pub pending_rounds: u32,
    /// Fail every image job with this error.
    pub image_failure: Option<String>,
    /// Reject image submissions with this status and error.
    pub reject_image: Option<(u16, String)>,
}

#[derive(Default)]
struct BackendState {
    base_url: String,
    behavior: BackendBehavior,
    next_job: u32,
    status_hits: HashMap<String, u32>,
    submissions: Vec<(String, Value)>,
}

type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub base_url: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start(behavior: BackendBehavior) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");
        let base_url = format!("http://{addr}");

        let state: Shared = Arc::new(Mutex::new(BackendState {
            base_url: base_url.clone(),
            behavior,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/generate", post(submit_image))
            .route("/api/video", post(submit_video))
            .route("/api/status/{job_id}", get(image_status))
            .route("/api/video/status/{job_id}", get(video_status))
            .route("/files/{name}", get(download))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    /// `(path, payload)` for every accepted or rejected submission.
    pub fn submissions(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().submissions.clone()
    }

    pub fn status_hits(&self, job_id: &str) -> u32 {
        self.state
            .lock()
            .unwrap()
            .status_hits
            .get(job_id)
            .copied()
            .unwrap_or(0)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn record(state: &Shared, path: &str, payload: Value, prefix: &str) -> String {
    let mut state = state.lock().unwrap();
    state.submissions.push((path.to_string(), payload));
    state.next_job += 1;
    format!("{prefix}-{}", state.next_job)
}

async fn submit_image(State(state): State<Shared>, Json(payload): Json<Value>) -> Response {
    let rejection = state.lock().unwrap().behavior.reject_image.clone();
    if let Some((status, error)) = rejection {
        state
            .lock()
            .unwrap()
            .submissions
            .push(("/api/generate".to_string(), payload));
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(json!({ "error": error }))).into_response();
    }

    let job_id = record(&state, "/api/generate", payload, "img");
    Json(json!({ "job_id": job_id, "status": "processing" })).into_response()
}

async fn submit_video(State(state): State<Shared>, Json(payload): Json<Value>) -> Response {
    let job_id = record(&state, "/api/video", payload, "vid");
    Json(json!({ "job_id": job_id, "status": "processing" })).into_response()
}

async fn image_status(State(state): State<Shared>, Path(job_id): Path<String>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let hits = {
        let hits = state.status_hits.entry(job_id.clone()).or_insert(0);
        *hits += 1;
        *hits
    };

    if let Some(error) = state.behavior.image_failure.clone() {
        return Json(json!({ "job_id": job_id, "status": "failed", "error": error }));
    }
    if hits <= state.behavior.pending_rounds {
        return Json(json!({ "job_id": job_id, "status": "processing" }));
    }
    Json(json!({
        "job_id": job_id,
        "status": "completed",
        "image_file": format!("outputs/{job_id}.png"),
        "latency_sec": 12.5
    }))
}

async fn video_status(State(state): State<Shared>, Path(job_id): Path<String>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let hits = {
        let hits = state.status_hits.entry(job_id.clone()).or_insert(0);
        *hits += 1;
        *hits
    };

    if hits <= state.behavior.pending_rounds {
        // No status field at all: still pending.
        return Json(json!({ "job_id": job_id }));
    }
    Json(json!({
        "job_id": job_id,
        "status": "completed",
        "video_file": format!("{}/files/{job_id}.mp4", state.base_url)
    }))
}

async fn download(Path(name): Path<String>) -> Response {
    if name.ends_with(".mp4") {
        VIDEO_BYTES.into_response()
    } else {
        (StatusCode::NOT_FOUND, "missing").into_response()
    }
}
