//! Common Test Utilities
//!
//! Shared helpers: an in-process mock backend on a random port and a
//! `TestApp` that drives the real router with `oneshot`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use seat_console::application::client::{ApiClient, ClientSettings};
use seat_console::config::{
    BackendSettings, ConsoleSettings, CorsSettings, ProxySettings, ServerSettings, Settings,
};
use seat_console::startup::{build_router, AppState};

/// A real HTTP server standing in for the backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn spawn(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self { addr, handle }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Console client pointed straight at this backend.
    pub fn client(&self) -> Arc<ApiClient> {
        Arc::new(ApiClient::new(&ClientSettings::new(self.url())).unwrap())
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// URL of a port nothing listens on.
pub async fn dead_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_settings(backend_url: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        backend: BackendSettings {
            url: backend_url.into(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        proxy: ProxySettings::default(),
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        console: ConsoleSettings::default(),
        environment: "test".into(),
    }
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub fn new(backend_url: &str) -> Self {
        Self::with_settings(test_settings(backend_url))
    }

    pub fn with_settings(settings: Settings) -> Self {
        let state = AppState::new(settings).unwrap();
        Self {
            router: build_router(state),
        }
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.request(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

pub async fn body_bytes(response: Response) -> axum::body::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Status and JSON body in one go.
pub async fn status_and_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    (status, body_json(response).await)
}
