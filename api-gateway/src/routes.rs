use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use crate::app_state::AppState;
use crate::handlers::{self, bookings::create_booking, listings::list_listings};
use crate::middleware::{cors, request_logging};

pub fn create_app(app_state: AppState) -> Router {
    // 创建中间件层，CORS 在最内层，保证 404 和错误响应也带上 CORS 头
    let middleware_layer = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn_with_state(app_state.clone(), cors))
        .into_inner();

    Router::new()
        .route(
            "/public/listings",
            // HEAD 不走 GET 处理器
            get(list_listings)
                .head(handlers::route_not_found)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/public/bookings",
            post(create_booking).fallback(handlers::route_not_found),
        )
        .fallback(handlers::route_not_found)
        .layer(middleware_layer)
        .with_state(app_state)
}
