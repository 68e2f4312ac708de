//! Storage abstraction traits.
//!
//! The domain layer talks to persistence only through these traits, so a
//! document-database driver can replace the JSON file store without
//! touching the services.

use anyhow::Result;
use async_trait::async_trait;
use shared::{City, Comment, Offer, User};

/// Interface for offer storage operations.
#[async_trait]
pub trait OfferStorage: Send + Sync {
    /// Store a new offer.
    async fn store_offer(&self, offer: &Offer) -> Result<()>;

    /// Retrieve a specific offer by ID.
    async fn get_offer(&self, offer_id: &str) -> Result<Option<Offer>>;

    /// List all offers.
    async fn list_offers(&self) -> Result<Vec<Offer>>;

    /// Replace an existing offer.
    async fn update_offer(&self, offer: &Offer) -> Result<()>;

    /// Delete an offer by ID. Returns true if the offer existed.
    async fn delete_offer(&self, offer_id: &str) -> Result<bool>;
}

/// Interface for user storage operations.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user.
    async fn store_user(&self, user: &User) -> Result<()>;

    /// Retrieve a specific user by ID.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Look a user up by email (emails are unique).
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// List all users ordered by name.
    async fn list_users(&self) -> Result<Vec<User>>;
}

/// Interface for city storage operations.
#[async_trait]
pub trait CityStorage: Send + Sync {
    /// Store a new city.
    async fn store_city(&self, city: &City) -> Result<()>;

    /// Retrieve a specific city by ID.
    async fn get_city(&self, city_id: &str) -> Result<Option<City>>;

    /// Look a city up by name (names are unique).
    async fn find_city_by_name(&self, name: &str) -> Result<Option<City>>;

    /// List all cities ordered by name.
    async fn list_cities(&self) -> Result<Vec<City>>;
}

/// Interface for comment storage operations.
#[async_trait]
pub trait CommentStorage: Send + Sync {
    /// Store a new comment.
    async fn store_comment(&self, comment: &Comment) -> Result<()>;

    /// List all comments for an offer, newest first.
    async fn list_comments_for_offer(&self, offer_id: &str) -> Result<Vec<Comment>>;

    /// Delete every comment attached to an offer. Returns the number
    /// removed.
    async fn delete_comments_for_offer(&self, offer_id: &str) -> Result<u32>;
}
