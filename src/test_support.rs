//! In-process stand-in for the processing API.

use crate::api::ApiClient;
use crate::config::Config;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct RecordedUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct Shared {
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
}

pub struct FakeApi {
    addr: SocketAddr,
    prefix: String,
    shared: Shared,
}

impl FakeApi {
    /// Upload answers 400 with an `error` body.
    pub const REJECTED_NAME: &'static str = "rejected.wav";
    /// Upload answers 200 without `processed_file`.
    pub const EMPTY_NAME: &'static str = "empty_result.wav";
    /// Upload answers after a short delay.
    pub const SLOW_NAME: &'static str = "slow.wav";
    /// Upload answers 200 with a plain-text body.
    pub const PLAIN_TEXT_NAME: &'static str = "plain_ack.wav";
    pub const ARTIFACT_BYTES: &'static [u8] = b"processed-audio";

    pub async fn start() -> Self {
        Self::start_under("").await
    }

    /// Serves the API routes below `prefix`, e.g. `/api`. Artifacts stay at
    /// the server root.
    pub async fn start_under(prefix: &str) -> Self {
        let shared = Shared::default();
        let api = Router::new()
            .route("/upload", post(upload))
            .route("/translate", post(translate));
        let api = if prefix.is_empty() {
            api
        } else {
            Router::new().nest(prefix, api)
        };
        let app = api
            .route("/processed/clean_voice.wav", get(artifact))
            .route("/audio_output/translated.mp3", get(artifact))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            prefix: prefix.to_string(),
            shared,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            api_base_url: format!("http://{}{}", self.addr, self.prefix),
            ..Config::default()
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).unwrap()
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.shared.uploads.lock().unwrap().clone()
    }
}

/// Yields to the runtime until `done` holds, giving up after a few seconds.
pub async fn settle(mut done: impl FnMut() -> bool) {
    for _ in 0..500 {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("background task did not finish in time");
}

async fn read_form(mut multipart: Multipart) -> RecordedUpload {
    let mut upload = RecordedUpload::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            upload.file_name = field.file_name().unwrap_or_default().to_string();
            upload.content_type = field.content_type().map(str::to_string);
            upload.bytes = field.bytes().await.unwrap().to_vec();
        } else {
            let value = field.text().await.unwrap();
            upload.fields.insert(name, value);
        }
    }
    upload
}

async fn upload(State(shared): State<Shared>, multipart: Multipart) -> Response {
    let upload = read_form(multipart).await;
    let name = upload.file_name.clone();
    shared.uploads.lock().unwrap().push(upload);

    if name == FakeApi::REJECTED_NAME {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Unsupported sample rate" })),
        )
            .into_response()
    } else if name == FakeApi::EMPTY_NAME {
        Json(json!({ "status": "queued" })).into_response()
    } else if name == FakeApi::PLAIN_TEXT_NAME {
        "OK".into_response()
    } else {
        if name == FakeApi::SLOW_NAME {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Json(json!({ "processed_file": format!("/processed/clean_{}", name) })).into_response()
    }
}

async fn translate(State(shared): State<Shared>, multipart: Multipart) -> Response {
    let upload = read_form(multipart).await;
    let target = upload.fields.get("target_lang").cloned().unwrap_or_default();
    let voice = upload.fields.get("voice_type").cloned().unwrap_or_default();
    let rejected = upload.file_name == FakeApi::REJECTED_NAME;
    shared.uploads.lock().unwrap().push(upload);

    if rejected {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Speech recognition failed" })),
        )
            .into_response();
    }

    Json(json!({
        "original_text": "hello",
        "translated_text": format!("translated to {} with voice {}", target, voice),
        "audio_url": "/audio_output/translated.mp3",
    }))
    .into_response()
}

async fn artifact() -> &'static [u8] {
    FakeApi::ARTIFACT_BYTES
}
