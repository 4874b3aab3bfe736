use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use kost_shared::{Action, ApiResponse, Listings};
use serde_json::json;
use tracing::info;
use crate::app_state::AppState;
use super::failure;

pub const LISTINGS_FALLBACK: &str = "failed to load listings";

/// 获取已发布的房源和房间，数据原样透传
pub async fn list_listings(State(state): State<AppState>) -> Response {
    match state.backend.call(Action::PublicListings, json!({})).await {
        Ok(data) => {
            let listings = Listings::from_response(&data);
            let groups = listings.grouped();
            info!(
                published = groups.len(),
                listed_rooms = groups.iter().map(|g| g.kamar.len()).sum::<usize>(),
                available_rooms = listings.available_rooms().len(),
                "Listings loaded from upstream"
            );

            // 上游没有返回 data 时省略该字段
            let body = ApiResponse {
                success: true,
                data: Some(data).filter(|d| !d.is_null()),
                error: None,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => failure(StatusCode::INTERNAL_SERVER_ERROR, err, LISTINGS_FALLBACK),
    }
}
