use async_trait::async_trait;
use kost_shared::{Action, GatewayError, UpstreamRequest, ENDPOINT_VAR};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const UPSTREAM_FALLBACK: &str = "upstream returned an error";

/// 自动化后端（Apps Script）的调用入口
#[async_trait]
pub trait AutomationBackend: Send + Sync {
    /// 成功时只返回内层 `data`，调用方看不到外层信封
    async fn call(&self, action: Action, payload: Value) -> Result<Value, GatewayError>;
}

/// 基于 reqwest 的 Apps Script 客户端
pub struct AppsScriptClient {
    endpoint: Option<String>,
    http_client: reqwest::Client,
}

impl AppsScriptClient {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AutomationBackend for AppsScriptClient {
    async fn call(&self, action: Action, payload: Value) -> Result<Value, GatewayError> {
        let endpoint = self.endpoint.as_deref().ok_or_else(|| {
            GatewayError::Configuration(format!("{} is not configured", ENDPOINT_VAR))
        })?;

        debug!("Calling upstream action {}", action);

        let response = self
            .http_client
            .post(endpoint)
            .json(&UpstreamRequest { action, payload })
            .send()
            .await
            .map_err(|e| {
                warn!("Upstream request for {} failed: {}", action, e);
                GatewayError::Upstream(format!("upstream request failed: {}", e))
            })?;

        let status = response.status();
        // 读取失败与解析失败同样按空对象处理
        let body = response.bytes().await.unwrap_or_default();

        interpret_response(status, &body)
    }
}

/// 将上游的状态码和响应体映射为成功数据或错误
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Value, GatewayError> {
    if !status.is_success() {
        return Err(GatewayError::Upstream(format!(
            "upstream error ({})",
            status.as_u16()
        )));
    }

    let parsed: Value =
        serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new()));

    if parsed.get("success") != Some(&Value::Bool(true)) {
        let message = parsed
            .pointer("/error/message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(UPSTREAM_FALLBACK);
        return Err(GatewayError::Upstream(message.to_string()));
    }

    Ok(parsed.get("data").cloned().unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream_message(result: Result<Value, GatewayError>) -> String {
        match result {
            Err(GatewayError::Upstream(message)) => message,
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_success_returns_inner_data() {
        let body = br#"{"success":true,"data":{"id_booking":"B1"}}"#;
        let data = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(data, json!({"id_booking": "B1"}));
    }

    #[test]
    fn test_success_without_data_is_null() {
        let data = interpret_response(StatusCode::OK, br#"{"success":true}"#).unwrap();
        assert_eq!(data, Value::Null);
    }

    #[test]
    fn test_non_success_status_includes_code() {
        let result = interpret_response(StatusCode::BAD_GATEWAY, br#"{"success":true}"#);
        assert_eq!(upstream_message(result), "upstream error (502)");
    }

    #[test]
    fn test_success_flag_must_be_strictly_true() {
        for body in [
            r#"{"success":"true","data":{}}"#,
            r#"{"success":1}"#,
            r#"{"data":{}}"#,
            "null",
        ] {
            let result = interpret_response(StatusCode::OK, body.as_bytes());
            assert_eq!(upstream_message(result), UPSTREAM_FALLBACK);
        }
    }

    #[test]
    fn test_upstream_message_passed_through() {
        let body = br#"{"success":false,"error":{"message":"quota exceeded"}}"#;
        let result = interpret_response(StatusCode::OK, body);
        assert_eq!(upstream_message(result), "quota exceeded");
    }

    #[test]
    fn test_upstream_message_kept_verbatim() {
        let body = br#"{"success":false,"error":{"message":"  sheet locked \n"}}"#;
        let result = interpret_response(StatusCode::OK, body);
        assert_eq!(upstream_message(result), "  sheet locked \n");

        let blank = br#"{"success":false,"error":{"message":"   "}}"#;
        let result = interpret_response(StatusCode::OK, blank);
        assert_eq!(upstream_message(result), UPSTREAM_FALLBACK);
    }

    #[test]
    fn test_unparseable_body_uses_fallback() {
        let result = interpret_response(StatusCode::OK, b"<html>oops</html>");
        assert_eq!(upstream_message(result), UPSTREAM_FALLBACK);
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_configuration_error() {
        let client = AppsScriptClient::new(None);
        let result = client.call(Action::PublicListings, json!({})).await;
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_client_posts_action_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exec"))
            .and(body_json(json!({"action": "publicListings", "payload": {}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"kost": [], "kamar": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AppsScriptClient::new(Some(format!("{}/exec", server.uri())));
        let data = client.call(Action::PublicListings, json!({})).await.unwrap();

        assert_eq!(data, json!({"kost": [], "kamar": []}));
    }

    #[tokio::test]
    async fn test_client_maps_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = AppsScriptClient::new(Some(server.uri()));
        let result = client.call(Action::PublicCreateBooking, json!({})).await;

        assert_eq!(upstream_message(result), "upstream error (503)");
    }

    #[tokio::test]
    async fn test_client_maps_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = AppsScriptClient::new(Some(server.uri()));
        let result = client.call(Action::PublicListings, json!({})).await;

        assert_eq!(upstream_message(result), UPSTREAM_FALLBACK);
    }
}
