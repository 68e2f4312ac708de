use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{CreateOfferRequest, UpdateOfferRequest};
use tracing::info;

use super::AppState;

/// Query parameters for the offer list endpoint.
#[derive(Deserialize, Debug)]
pub struct OfferListQuery {
    pub city: Option<String>,
    pub limit: Option<u32>,
}

/// Axum handler for GET /api/offers
pub async fn list_offers(
    State(state): State<AppState>,
    Query(query): Query<OfferListQuery>,
) -> impl IntoResponse {
    info!("GET /api/offers - query: {:?}", query);

    match state.offer_service.list(query.city.as_deref(), query.limit).await {
        Ok(offers) => (StatusCode::OK, Json(offers)).into_response(),
        Err(e) => {
            tracing::error!("Error listing offers: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing offers").into_response()
        }
    }
}

/// Axum handler for POST /api/offers
pub async fn create_offer(
    State(state): State<AppState>,
    Json(request): Json<CreateOfferRequest>,
) -> impl IntoResponse {
    info!("POST /api/offers - name: {}", request.name);

    match state.offer_service.create(request).await {
        Ok(offer) => (StatusCode::CREATED, Json(offer)).into_response(),
        Err(e) => {
            tracing::error!("Error creating offer: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for GET /api/offers/:offer_id
pub async fn get_offer(
    State(state): State<AppState>,
    Path(offer_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/offers/{}", offer_id);

    match state.offer_service.get(&offer_id).await {
        Ok(Some(offer)) => (StatusCode::OK, Json(offer)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Offer not found").into_response(),
        Err(e) => {
            tracing::error!("Error retrieving offer: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving offer").into_response()
        }
    }
}

/// Axum handler for PATCH /api/offers/:offer_id
pub async fn patch_offer(
    State(state): State<AppState>,
    Path(offer_id): Path<String>,
    Json(request): Json<UpdateOfferRequest>,
) -> impl IntoResponse {
    info!("PATCH /api/offers/{}", offer_id);

    match state.offer_service.update(&offer_id, request).await {
        Ok(Some(offer)) => (StatusCode::OK, Json(offer)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Offer not found").into_response(),
        Err(e) => {
            tracing::error!("Error updating offer: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for DELETE /api/offers/:offer_id
pub async fn delete_offer(
    State(state): State<AppState>,
    Path(offer_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/offers/{}", offer_id);

    match state.offer_service.delete(&offer_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Offer not found").into_response(),
        Err(e) => {
            tracing::error!("Error deleting offer: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting offer").into_response()
        }
    }
}
