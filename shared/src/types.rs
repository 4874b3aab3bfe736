use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// 公开渠道的默认来源标识
pub const PUBLIC_SOURCE: &str = "website-publik";

/// 预订成功后统一返回的确认文案，不使用上游返回的文字
pub const BOOKING_CONFIRMATION: &str = "Booking received; our team will contact you";

// API 响应类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                message: message.into(),
            }),
        }
    }
}

/// 上游 Apps Script 支持的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "publicListings")]
    PublicListings,
    #[serde(rename = "publicCreateBooking")]
    PublicCreateBooking,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::PublicListings => "publicListings",
            Action::PublicCreateBooking => "publicCreateBooking",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 发往上游的请求体 `{ action, payload }`
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamRequest {
    pub action: Action,
    pub payload: Value,
}

/// 入站预订请求，字段保持原始 JSON 值，之后统一清洗
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingInput {
    #[serde(alias = "nama")]
    pub name: Value,
    #[serde(alias = "no_hp")]
    pub phone: Value,
    pub email: Value,
    #[serde(rename = "roomId", alias = "id_kamar")]
    pub room_id: Value,
    #[serde(rename = "moveInDate", alias = "tgl_masuk")]
    pub move_in_date: Value,
    #[serde(rename = "durationMonths", alias = "durasi_bulan")]
    pub duration_months: Value,
    #[serde(alias = "catatan")]
    pub notes: Value,
    #[serde(alias = "sumber")]
    pub source: Value,
}

/// 校验通过的预订请求
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub room_id: String,
    pub move_in_date: String,
    pub duration_months: u32,
    pub notes: String,
    pub source: String,
}

impl BookingRequest {
    /// 生成发往上游的 payload，字段名与预订表格保持一致
    pub fn into_payload(self, api_token: &str) -> Value {
        json!({
            "nama": self.name,
            "no_hp": self.phone,
            "email": self.email,
            "id_kamar": self.room_id,
            "tgl_masuk": self.move_in_date,
            "durasi_bulan": self.duration_months,
            "catatan": self.notes,
            "sumber": self.source,
            "api_token": api_token,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub id_booking: String,
    pub message: String,
}

impl BookingReceipt {
    pub fn confirmed(id_booking: impl Into<String>) -> Self {
        Self {
            id_booking: id_booking.into(),
            message: BOOKING_CONFIRMATION.to_string(),
        }
    }
}

// 配置相关类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 逗号分隔的来源白名单
    #[serde(default)]
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

// 错误类型
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Upstream(String),

    #[error("route not found")]
    RouteNotFound,
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::Configuration(_) => "configuration",
            GatewayError::Upstream(_) => "upstream",
            GatewayError::RouteNotFound => "route",
        }
    }
}
