use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::CreateUserRequest;
use tracing::info;

use super::AppState;

/// Axum handler for GET /api/users
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/users");

    match state.user_service.list().await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => {
            tracing::error!("Error listing users: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing users").into_response()
        }
    }
}

/// Axum handler for POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> impl IntoResponse {
    info!("POST /api/users - email: {}", request.email);

    match state.user_service.create(request).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => {
            tracing::error!("Error creating user: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for GET /api/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}", user_id);

    match state.user_service.get(&user_id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => {
            tracing::error!("Error retrieving user: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving user").into_response()
        }
    }
}
