use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        VARY,
    },
    HeaderMap, HeaderValue,
};
use kost_shared::parse_origin_list;
use tracing::warn;

const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";
const ANY_ORIGIN: &str = "*";

/// 来源白名单，进程启动时解析一次，之后只读
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed: Vec<HeaderValue>,
}

impl CorsPolicy {
    /// 解析逗号分隔的白名单；无法作为响应头的条目会被丢弃
    pub fn from_list(raw: &str) -> Self {
        let allowed = parse_origin_list(raw)
            .into_iter()
            .filter_map(|origin| match HeaderValue::from_str(&origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid allowed origin: {:?}", origin);
                    None
                }
            })
            .collect();

        Self { allowed }
    }

    pub fn allowed(&self) -> &[HeaderValue] {
        &self.allowed
    }

    /// 命中白名单时回显请求来源，否则退回第一个配置项，白名单为空时为 `*`
    pub fn allow_origin(&self, origin: Option<&HeaderValue>) -> HeaderValue {
        let origin = origin.map(HeaderValue::as_bytes).unwrap_or_default();

        self.allowed
            .iter()
            .find(|allowed| allowed.as_bytes() == origin)
            .or_else(|| self.allowed.first())
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(ANY_ORIGIN))
    }

    pub fn headers(&self, origin: Option<&HeaderValue>) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin(origin));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(VARY, HeaderValue::from_static("Origin"));
        headers
    }

    /// 合并到响应头，同名头被覆盖
    pub fn apply(&self, origin: Option<&HeaderValue>, target: &mut HeaderMap) {
        for (name, value) in self.headers(origin) {
            if let Some(name) = name {
                target.insert(name, value);
            }
        }
    }
}
