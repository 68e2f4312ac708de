use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::CreateCommentRequest;
use tracing::info;

use super::AppState;

/// Axum handler for GET /api/comments/:offer_id
pub async fn list_comments(
    State(state): State<AppState>,
    Path(offer_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/comments/{}", offer_id);

    match state.comment_service.list_for_offer(&offer_id).await {
        Ok(Some(comments)) => (StatusCode::OK, Json(comments)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Offer not found").into_response(),
        Err(e) => {
            tracing::error!("Error listing comments: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing comments").into_response()
        }
    }
}

/// Axum handler for POST /api/comments/:offer_id
pub async fn create_comment(
    State(state): State<AppState>,
    Path(offer_id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> impl IntoResponse {
    info!("POST /api/comments/{}", offer_id);

    match state.comment_service.create(&offer_id, request).await {
        Ok(Some(comment)) => (StatusCode::CREATED, Json(comment)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Offer not found").into_response(),
        Err(e) => {
            tracing::error!("Error creating comment: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
