//! `X-Request-Id` propagation
//!
//! Reuses the caller's id or mints a UUID, runs the rest of the stack inside
//! a `request` span carrying it, and echoes it on the response.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Available to handlers as `Extension<RequestId>`
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

fn incoming_id(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(String::from)
}

pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = incoming_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum::Router;
    use tower::Service;

    use super::*;

    async fn call(header: Option<&str>) -> String {
        let mut svc = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(request_id_middleware))
            .into_service();

        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(REQUEST_ID_HEADER, value);
        }
        let resp = svc.call(builder.body(Body::empty()).unwrap()).await.unwrap();
        resp.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn caller_id_is_echoed() {
        assert_eq!(call(Some("abc-123")).await, "abc-123");
    }

    #[tokio::test]
    async fn missing_id_is_generated() {
        let id = call(None).await;
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
