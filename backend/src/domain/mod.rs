//! Domain services. Each service owns its repositories via constructor
//! injection over one shared [`JsonConnection`](crate::storage::json::JsonConnection).

pub mod city_service;
pub mod comment_service;
pub mod ids;
pub mod import_service;
pub mod models;
pub mod offer_service;
pub mod user_service;

pub use city_service::CityService;
pub use comment_service::CommentService;
pub use import_service::ImportService;
pub use offer_service::OfferService;
pub use user_service::UserService;
