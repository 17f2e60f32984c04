use axum::{extract::Request, middleware::Next, response::Response};

/// Emits one `Request` line per incoming request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    tracing::info!(method = %method, path = %path, "Request: {} {}", method, path);

    next.run(request).await
}
