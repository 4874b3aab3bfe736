use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn, error};
use std::time::Instant;
use crate::app_state::AppState;

pub async fn request_logging(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    info!("Incoming request: {} {}", method, uri);

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    if status.is_success() {
        info!("Request completed: {} {} - {}ms", method, uri, duration.as_millis());
    } else if status.is_client_error() {
        warn!("Client error: {} {} - {} ({})", method, uri, status, duration.as_millis());
    } else {
        error!("Server error: {} {} - {} ({})", method, uri, status, duration.as_millis());
    }

    response
}

/// 处理预检请求，并把 CORS 头合并到每一个响应上
pub async fn cors(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let origin = req.headers().get(ORIGIN).cloned();

    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    state.cors.apply(origin.as_ref(), response.headers_mut());
    response
}
