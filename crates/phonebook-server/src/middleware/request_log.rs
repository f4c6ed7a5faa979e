//! Request logging middleware
//!
//! Emits one line per request once the response is ready:
//! method, path, status, response content length, latency in milliseconds,
//! and for write requests the JSON body that was sent.
//!
//! The body is buffered only for `POST`, `PUT` and `PATCH`; the request is
//! rebuilt from the captured bytes before it reaches the router. A body larger
//! than [`MAX_BODY_BYTES`] is answered with `413 Payload Too Large` and never
//! reaches the router.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use phonebook_common::ErrorBody;
use serde_json::Value as JsonValue;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::{info, warn};

/// Largest request body buffered for logging and handed on to the router
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Request logging layer
#[derive(Clone, Debug, Default)]
pub struct RequestLogLayer;

impl RequestLogLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogMiddleware { inner }
    }
}

/// Request logging service
#[derive(Clone, Debug)]
pub struct RequestLogMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for RequestLogMiddleware<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let started = Instant::now();
            let method = request.method().clone();
            let path = request.uri().path().to_string();

            let (request, body) = if carries_body(&method) {
                let (parts, body) = request.into_parts();
                let bytes = match Limited::new(body, MAX_BODY_BYTES).collect().await {
                    Ok(collected) => collected.to_bytes(),
                    Err(e) if e.is::<LengthLimitError>() => {
                        warn!(
                            method = %method,
                            path = %path,
                            limit = MAX_BODY_BYTES,
                            "Request body too large"
                        );
                        return Ok(payload_too_large());
                    },
                    Err(e) => {
                        warn!(method = %method, path = %path, error = %e, "Failed to capture request body");
                        Bytes::new()
                    },
                };
                let logged = render_body(&bytes);
                (Request::from_parts(parts, Body::from(bytes)), logged)
            } else {
                (request, None)
            };

            let response = inner.call(request).await?;

            let content_length = response
                .headers()
                .get(header::CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string();
            let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

            info!(
                method = %method,
                path = %path,
                status = response.status().as_u16(),
                content_length = %content_length,
                latency_ms,
                body = body.as_deref().unwrap_or(""),
                "{} {} {} {} - {:.3} ms {}",
                method,
                path,
                response.status().as_u16(),
                content_length,
                latency_ms,
                body.as_deref().unwrap_or("")
            );

            Ok(response)
        })
    }
}

fn payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(ErrorBody::new("request entity too large")),
    )
        .into_response()
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Compact JSON form of the body, or `None` when it is empty or not JSON
fn render_body(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice::<JsonValue>(bytes)
        .ok()
        .map(|value| value.to_string())
}
