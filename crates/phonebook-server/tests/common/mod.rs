//! Shared helpers for driving the router in-process

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use phonebook_server::{api::create_router, config::Config, store::SharedStore};
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub fn app_with(store: SharedStore) -> Router {
    create_router(store, &Config::default())
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header("content-type", "application/json");
            Body::from(text.to_string())
        },
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, "GET", uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> TestResponse {
    send(app, "POST", uri, Some(&body.to_string())).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> TestResponse {
    send(app, "PUT", uri, Some(&body.to_string())).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, "DELETE", uri, None).await
}
