use std::sync::Arc;
use kost_shared::AppConfig;
use crate::cors::CorsPolicy;
use crate::upstream::{AppsScriptClient, AutomationBackend};

/// 应用程序状态，启动后只读
#[derive(Clone)]
pub struct AppState {
    /// 来源白名单
    pub cors: Arc<CorsPolicy>,
    /// 上游自动化服务
    pub backend: Arc<dyn AutomationBackend>,
    /// 创建预订时附带的上游令牌
    pub api_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let backend = AppsScriptClient::new(config.upstream.endpoint.clone());
        Self::with_backend(config, Arc::new(backend))
    }

    pub fn with_backend(config: &AppConfig, backend: Arc<dyn AutomationBackend>) -> Self {
        Self {
            cors: Arc::new(CorsPolicy::from_list(&config.cors.allowed_origins)),
            backend,
            api_token: config.upstream.api_token.as_deref().map(Arc::from),
        }
    }
}
