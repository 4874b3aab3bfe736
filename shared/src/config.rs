use crate::types::AppConfig;
use crate::utils::non_empty;
use anyhow::Result;
use config::{Config, Environment, File};
use dotenvy::dotenv;
use std::env;

/// 部署环境中直接使用的变量名
pub const ALLOWED_ORIGINS_VAR: &str = "ALLOWED_ORIGINS";
pub const ENDPOINT_VAR: &str = "APPS_SCRIPT_URL";
pub const API_TOKEN_VAR: &str = "APPS_SCRIPT_API_TOKEN";
pub const PORT_VAR: &str = "PORT";

pub fn load_config() -> Result<AppConfig> {
    // 加载 .env 文件
    dotenv().ok();

    let defaults = AppConfig::default();

    let settings = Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("cors.allowed_origins", defaults.cors.allowed_origins)?
        .set_default("log.level", defaults.log.level)?
        // 添加默认配置文件
        .add_source(File::with_name("config/default").required(false))
        // 添加环境特定配置文件
        .add_source(
            File::with_name(&format!(
                "config/{}",
                env::var("ENV").unwrap_or_else(|_| "development".to_string())
            ))
            .required(false),
        )
        // 添加环境变量，使用 KOST__ 前缀
        .add_source(Environment::with_prefix("KOST").separator("__"))
        // 部署平台注入的原始变量优先级最高
        .set_override_option("cors.allowed_origins", env::var(ALLOWED_ORIGINS_VAR).ok())?
        .set_override_option("upstream.endpoint", env::var(ENDPOINT_VAR).ok())?
        .set_override_option("upstream.api_token", env::var(API_TOKEN_VAR).ok())?
        .set_override_option("server.port", env::var(PORT_VAR).ok())?
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    normalize_config(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// 去除空白并把空字符串视为未配置
fn normalize_config(config: &mut AppConfig) {
    config.upstream.endpoint = non_empty(config.upstream.endpoint.as_deref());
    config.upstream.api_token = non_empty(config.upstream.api_token.as_deref());
}

fn validate_config(config: &AppConfig) -> Result<()> {
    // 上游地址和令牌缺失不会阻止启动，请求时再报告配置错误
    if config.server.host.trim().is_empty() {
        return Err(anyhow::anyhow!("Server host cannot be empty"));
    }

    Ok(())
}

impl Default for AppConfig {
    fn default() -> Self {
        use crate::types::{CorsConfig, LogConfig, ServerConfig, UpstreamConfig};

        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8787,
            },
            cors: CorsConfig {
                allowed_origins: String::new(),
            },
            upstream: UpstreamConfig::default(),
            log: LogConfig {
                level: "info".to_string(),
            },
        }
    }
}
