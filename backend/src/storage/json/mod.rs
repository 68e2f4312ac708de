//! JSON-document storage backend.
//!
//! One document file per collection under a shared data directory, with
//! atomic whole-document writes. Stands in for the document database
//! behind the traits in [`crate::storage::traits`].

pub mod city_repository;
pub mod comment_repository;
pub mod connection;
pub mod offer_repository;
pub mod user_repository;

pub use city_repository::CityRepository;
pub use comment_repository::CommentRepository;
pub use connection::JsonConnection;
pub use offer_repository::OfferRepository;
pub use user_repository::UserRepository;
