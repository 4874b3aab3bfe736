pub mod bookings;
pub mod listings;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use kost_shared::{ApiResponse, GatewayError};
use tracing::{debug, error, warn};

/// 未匹配的路由统一返回 404 信封
pub async fn route_not_found() -> Response {
    failure(StatusCode::NOT_FOUND, GatewayError::RouteNotFound, "")
}

/// 把错误转换为统一信封；消息为空时使用 `fallback`
pub(crate) fn failure(status: StatusCode, err: GatewayError, fallback: &str) -> Response {
    let kind = err.kind();
    match &err {
        // 用户输入错误不属于系统故障
        GatewayError::Validation(message) => debug!(kind, "Rejected input: {}", message),
        GatewayError::Configuration(message) => error!(kind, "Gateway misconfigured: {}", message),
        GatewayError::Upstream(message) => warn!(kind, "Upstream failure: {}", message),
        GatewayError::RouteNotFound => debug!(kind, "No route matched"),
    }

    let message = err.to_string();
    let message = if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
