use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use mosheng_ops::domain::tts::SynthesisRequest;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

/// Knobs and recordings of the fake TTS service
pub struct MockTtsState {
    pub synthesize_status: Mutex<StatusCode>,
    pub confirm_success: Mutex<bool>,
    pub malformed_voice_types: Mutex<bool>,
    pub synthesize_content_type: Mutex<Option<String>>,
    pub synthesize_body: Mutex<Option<String>>,
    pub confirm_body: Mutex<Option<SynthesisRequest>>,
    pub status_requests: Mutex<Vec<String>>,
}

impl MockTtsState {
    pub fn new() -> Self {
        Self {
            synthesize_status: Mutex::new(StatusCode::ACCEPTED),
            confirm_success: Mutex::new(true),
            malformed_voice_types: Mutex::new(false),
            synthesize_content_type: Mutex::new(None),
            synthesize_body: Mutex::new(None),
            confirm_body: Mutex::new(None),
            status_requests: Mutex::new(Vec::new()),
        }
    }
}

pub fn router(state: Arc<MockTtsState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/tts/voice_types", get(voice_types))
        .route("/tts/synthesize", post(synthesize))
        .route("/tts/task_status/:task_id", get(task_status))
        .route("/tts/confirm_script", post(confirm_script))
        .with_state(state)
}

async fn voice_types(State(state): State<Arc<MockTtsState>>) -> Response {
    if *state.malformed_voice_types.lock() {
        return (StatusCode::OK, "<html>gateway page</html>").into_response();
    }
    Json(json!({
        "voice_types": {
            "男声": ["男声1沉稳", "男声2阳光"],
            "女声": ["女声1大气磁性", "女声2温柔", "女声3活泼"]
        }
    }))
    .into_response()
}

async fn synthesize(
    State(state): State<Arc<MockTtsState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    *state.synthesize_content_type.lock() = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.synthesize_body.lock() = Some(body);

    let status = *state.synthesize_status.lock();
    if status != StatusCode::ACCEPTED {
        return (status, Json(json!({"detail": "queue full"}))).into_response();
    }

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "task_id": "task-42",
            "status_url": "/tts/task_status/task-42"
        })),
    )
        .into_response()
}

async fn task_status(
    State(state): State<Arc<MockTtsState>>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    state.status_requests.lock().push(task_id.clone());
    Json(json!({
        "status": "completed",
        "result": {
            "success": true,
            "wav_url": format!("/audio/{}.wav", task_id),
            "mp3_url": format!("/audio/{}.mp3", task_id)
        }
    }))
}

async fn confirm_script(
    State(state): State<Arc<MockTtsState>>,
    Json(request): Json<SynthesisRequest>,
) -> impl IntoResponse {
    *state.confirm_body.lock() = Some(request);
    Json(json!({
        "success": *state.confirm_success.lock(),
        "audio_id": "audio-7",
        "wav_url": "/audio/audio-7.wav",
        "mp3_url": "/audio/audio-7.mp3"
    }))
}
