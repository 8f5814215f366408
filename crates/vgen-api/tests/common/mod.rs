//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vgen_api::{create_router, ApiConfig, AppState};
use vgen_models::Catalog;
use vgen_provider::{ProviderConfig, RunwayClient};
use vgen_storage::UploadStorage;
use vgen_store::{MemoryStore, VideoStore};

pub const BOUNDARY: &str = "vgen-test-boundary";

/// Minimal PNG header, enough to look like an image upload.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

/// Build an app backed by an in-memory store and a temp uploads dir.
pub async fn spawn_app(simulation_delay: Duration) -> TestApp {
    spawn_app_with_store(simulation_delay, Arc::new(MemoryStore::new())).await
}

pub async fn spawn_app_with_store(
    simulation_delay: Duration,
    store: Arc<dyn VideoStore>,
) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = ApiConfig {
        uploads_dir: dir.path().join("uploads"),
        simulation_delay,
        ..ApiConfig::default()
    };

    let uploads = UploadStorage::new(config.uploads_dir.clone()).await.unwrap();
    let provider = RunwayClient::new(ProviderConfig::default()).unwrap();
    let state = AppState::from_parts(
        config,
        store,
        uploads,
        Catalog::builtin(),
        provider,
    );

    TestApp {
        router: create_router(state.clone(), None),
        state,
        dir,
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, bytes.to_vec())
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, bytes) = self.send(request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send_json(request).await
    }

    pub async fn post_multipart(&self, uri: &str, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send_json(request).await
    }

    /// Poll a job until it leaves `generating`.
    pub async fn wait_for_completion(&self, id: &str) -> Value {
        for _ in 0..100 {
            let (status, job) = self.get(&format!("/api/video/{}", id)).await;
            assert_eq!(status, StatusCode::OK);
            if job["status"] != "generating" {
                return job;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("job {} never completed", id);
    }

    pub fn uploads_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("uploads")
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        std::fs::read_dir(self.uploads_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }
}
