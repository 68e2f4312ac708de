use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod cities;
pub mod comments;
pub mod offers;
pub mod users;

use crate::domain::{CityService, CommentService, OfferService, UserService};
use crate::storage::json::JsonConnection;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub offer_service: OfferService,
    pub user_service: UserService,
    pub city_service: CityService,
    pub comment_service: CommentService,
}

impl AppState {
    /// Wire every service over one shared storage connection.
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            offer_service: OfferService::new(Arc::clone(&connection)),
            user_service: UserService::new(Arc::clone(&connection)),
            city_service: CityService::new(Arc::clone(&connection)),
            comment_service: CommentService::new(connection),
        }
    }
}

/// Build the application router: JSON API under `/api`, permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/offers", get(offers::list_offers).post(offers::create_offer))
        .route(
            "/offers/:offer_id",
            get(offers::get_offer)
                .patch(offers::patch_offer)
                .delete(offers::delete_offer),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:user_id", get(users::get_user))
        .route("/cities", get(cities::list_cities).post(cities::create_city))
        .route("/cities/:city_id", get(cities::get_city))
        .route(
            "/comments/:offer_id",
            get(comments::list_comments).post(comments::create_comment),
        );

    Router::new().nest("/api", api_routes).layer(cors).with_state(state)
}
