use anyhow::Result;
use kost_shared::{load_config, API_TOKEN_VAR, ENDPOINT_VAR};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod cors;
mod handlers;
mod middleware;
mod routes;
mod upstream;
mod utils;

use app_state::AppState;
use routes::create_app;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = load_config()?;

    // 初始化日志，RUST_LOG 优先于配置文件
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Configuration loaded successfully");

    if config.upstream.endpoint.is_none() {
        warn!("{} is not configured; upstream calls will fail", ENDPOINT_VAR);
    }
    if config.upstream.api_token.is_none() {
        warn!("{} is not configured; bookings will be rejected", API_TOKEN_VAR);
    }

    // 创建应用状态
    let app_state = AppState::new(&config);
    match app_state.cors.allowed() {
        [] => info!("No allowed origins configured; answering with *"),
        origins => info!("Allowed origins: {:?}", origins),
    }

    // 构建应用
    let app = create_app(app_state);

    // 启动服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Kost gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
