#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::{Value, json};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use vavoo_proxy::config::Config;
use vavoo_proxy::web::{AppState, WebServer};

pub const LOGOS: &str = r#"[
    {"name": "Rai 1", "logo": "https://logos.example/rai1.png"},
    {"name": "Sky Sport 24", "logo": "https://logos.example/ss24.png"}
]"#;

pub fn channel_list() -> Value {
    json!([
        {"id": 101, "name": "Rai 1", "country": "Italy"},
        {"id": 102, "name": "Rai 1 2", "country": "Italy"},
        {"id": 103, "name": "Sky Sport 24", "country": "Italy"},
        {"id": "104", "name": "Canale Più", "country": "Italy"},
        {"id": 201, "name": "BBC One", "country": "United Kingdom"},
        {"id": 105, "name": "Boing", "country": "Italy"}
    ])
}

/// Logo file that lives as long as the returned handle
pub fn logo_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(LOGOS.as_bytes()).unwrap();
    file
}

/// Configuration pointing every origin URL at the mock server
pub fn test_config(origin: &MockServer, logos: &NamedTempFile) -> Config {
    let mut config = Config::default();
    config.upstream.channels_url = format!("{}/channels", origin.uri());
    config.upstream.stream_url_template = format!("{}/play/{{id}}/index.m3u8", origin.uri());
    config.upstream.playlist_timeout = Duration::from_millis(500);
    config.upstream.segment_timeout = Duration::from_millis(500);
    config.logos.path = logos.path().to_path_buf();
    config
}

pub fn app(config: Config) -> Router {
    WebServer::create_router(AppState::new(config).unwrap())
}

pub async fn mount_channels(origin: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(origin)
        .await;
}

pub async fn send(
    app: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, HeaderMap, Bytes) {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

pub async fn send_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(app, uri, &[("host", "addon.example")]).await;
    let json = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body).unwrap_or(json!({}))
    };
    (status, json)
}
