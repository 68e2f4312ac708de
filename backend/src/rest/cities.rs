use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::CreateCityRequest;
use tracing::info;

use super::AppState;

/// Axum handler for GET /api/cities
pub async fn list_cities(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/cities");

    match state.city_service.list().await {
        Ok(cities) => (StatusCode::OK, Json(cities)).into_response(),
        Err(e) => {
            tracing::error!("Error listing cities: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing cities").into_response()
        }
    }
}

/// Axum handler for POST /api/cities
pub async fn create_city(
    State(state): State<AppState>,
    Json(request): Json<CreateCityRequest>,
) -> impl IntoResponse {
    info!("POST /api/cities - name: {}", request.name);

    match state.city_service.create(request).await {
        Ok(city) => (StatusCode::CREATED, Json(city)).into_response(),
        Err(e) => {
            tracing::error!("Error creating city: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for GET /api/cities/:city_id
pub async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/cities/{}", city_id);

    match state.city_service.get(&city_id).await {
        Ok(Some(city)) => (StatusCode::OK, Json(city)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "City not found").into_response(),
        Err(e) => {
            tracing::error!("Error retrieving city: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving city").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::tests::seeded_state;
    use shared::Coordinates;

    #[tokio::test]
    async fn create_and_get_city() {
        let (state, _temp_dir) = seeded_state().await;

        let request = CreateCityRequest {
            name: "Cologne".to_string(),
            location: Coordinates { latitude: 50.94, longitude: 6.96 },
        };
        let response = create_city(State(state.clone()), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let city = state.city_service.find_by_name("Cologne").await.unwrap().unwrap();
        let response = get_city(State(state), Path(city.id)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn duplicate_city_is_bad_request() {
        let (state, _temp_dir) = seeded_state().await;

        // "Amsterdam" is seeded.
        let request = CreateCityRequest {
            name: "Amsterdam".to_string(),
            location: Coordinates { latitude: 52.37, longitude: 4.89 },
        };
        let response = create_city(State(state), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let (state, _temp_dir) = seeded_state().await;
        let response = get_city(State(state), Path("city::ghost".to_string())).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
