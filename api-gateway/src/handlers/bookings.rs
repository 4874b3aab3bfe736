use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use kost_shared::{
    string_field, Action, ApiResponse, BookingInput, BookingReceipt, GatewayError, API_TOKEN_VAR,
};
use serde_json::Value;
use tracing::{debug, info};
use crate::app_state::AppState;
use crate::utils::validation::validate_booking;
use super::failure;

pub const BOOKING_FALLBACK: &str = "failed to create booking";

/// 创建预订
pub async fn create_booking(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = body.unwrap_or_default();

    match submit_booking(&state, &body).await {
        Ok(receipt) => (StatusCode::OK, Json(ApiResponse::success(receipt))).into_response(),
        Err(err) => failure(StatusCode::BAD_REQUEST, err, BOOKING_FALLBACK),
    }
}

async fn submit_booking(state: &AppState, body: &[u8]) -> Result<BookingReceipt, GatewayError> {
    let input = parse_booking_body(body);
    let booking = validate_booking(&input)?;

    // 令牌缺失属于配置错误，必须在调用上游之前拦截
    let api_token = state.api_token.as_deref().ok_or_else(|| {
        GatewayError::Configuration(format!("{} is not configured", API_TOKEN_VAR))
    })?;

    let room_id = booking.room_id.clone();
    let result = state
        .backend
        .call(Action::PublicCreateBooking, booking.into_payload(api_token))
        .await?;

    let id_booking = string_field(&result, "id_booking");
    info!("Booking {} created for room {}", id_booking, room_id);

    Ok(BookingReceipt::confirmed(id_booking))
}

/// 缺失、格式错误或非对象的请求体都按空对象处理
fn parse_booking_body(body: &[u8]) -> BookingInput {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_else(|e| {
            debug!("Booking body has conflicting fields: {}", e);
            BookingInput::default()
        }),
        _ => BookingInput::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tolerates_bad_bodies() {
        let bodies: [&[u8]; 5] = [b"", b"not json", b"null", b"[\"Sari\"]", b"42"];
        for body in bodies {
            let input = parse_booking_body(body);
            assert_eq!(input.name, Value::Null);
            assert_eq!(input.email, Value::Null);
        }
    }

    #[test]
    fn test_parse_reads_object_body() {
        let body = serde_json::to_vec(&json!({"name": "Sari", "durationMonths": 2})).unwrap();
        let input = parse_booking_body(&body);
        assert_eq!(input.name, json!("Sari"));
        assert_eq!(input.duration_months, json!(2));
    }
}
