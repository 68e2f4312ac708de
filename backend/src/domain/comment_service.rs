use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use shared::{Comment, CreateCommentRequest};
use tracing::info;

use super::ids;
use crate::storage::json::{CommentRepository, JsonConnection, OfferRepository, UserRepository};
use crate::storage::traits::{CommentStorage, OfferStorage, UserStorage};

const MIN_TEXT_LEN: usize = 5;
const MAX_TEXT_LEN: usize = 1024;
const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Comments returned per offer, newest first.
const MAX_COMMENTS_PER_OFFER: usize = 50;

/// Service for managing comments on offers.
///
/// Creating a comment also maintains the parent offer's aggregates: the
/// comment count and the averaged rating.
#[derive(Clone)]
pub struct CommentService {
    comment_repository: CommentRepository,
    offer_repository: OfferRepository,
    user_repository: UserRepository,
}

impl CommentService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            comment_repository: CommentRepository::new(Arc::clone(&connection)),
            offer_repository: OfferRepository::new(Arc::clone(&connection)),
            user_repository: UserRepository::new(connection),
        }
    }

    /// List comments for an offer, newest first. `None` when the offer is
    /// unknown.
    pub async fn list_for_offer(&self, offer_id: &str) -> Result<Option<Vec<Comment>>> {
        if self.offer_repository.get_offer(offer_id).await?.is_none() {
            return Ok(None);
        }

        let mut comments = self.comment_repository.list_comments_for_offer(offer_id).await?;
        comments.truncate(MAX_COMMENTS_PER_OFFER);
        Ok(Some(comments))
    }

    /// Attach a comment to an offer. `None` when the offer is unknown.
    pub async fn create(
        &self,
        offer_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Option<Comment>> {
        let Some(mut offer) = self.offer_repository.get_offer(offer_id).await? else {
            return Ok(None);
        };

        Self::validate(&request)?;
        if self.user_repository.get_user(&request.author_id).await?.is_none() {
            bail!("Author not found: {}", request.author_id);
        }

        let comment = Comment {
            id: ids::new_id("comment"),
            offer_id: offer_id.to_string(),
            text: request.text.trim().to_string(),
            rating: request.rating,
            author_id: request.author_id,
            posted_at: Utc::now(),
        };
        self.comment_repository.store_comment(&comment).await?;

        // Re-derive the offer aggregates from the stored comments.
        let comments = self.comment_repository.list_comments_for_offer(offer_id).await?;
        offer.comment_count = comments.len() as u32;
        offer.rating = average_rating(&comments);
        self.offer_repository.update_offer(&offer).await?;

        info!("Added comment {} to offer {}", comment.id, offer_id);
        Ok(Some(comment))
    }

    fn validate(request: &CreateCommentRequest) -> Result<()> {
        let len = request.text.trim().chars().count();
        if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len) {
            bail!("Comment text must be {} to {} characters", MIN_TEXT_LEN, MAX_TEXT_LEN);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            bail!("Comment rating must be {} to {}", MIN_RATING, MAX_RATING);
        }
        Ok(())
    }
}

/// Average comment rating rounded to one decimal place.
fn average_rating(comments: &[Comment]) -> f64 {
    if comments.is_empty() {
        return 0.0;
    }
    let sum: f64 = comments.iter().map(|comment| comment.rating).sum();
    (sum / comments.len() as f64 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        Coordinates, CreateCityRequest, CreateOfferRequest, CreateUserRequest, HousingType,
        UserType,
    };
    use tempfile::TempDir;

    use crate::domain::{CityService, OfferService, UserService};

    struct Fixture {
        comments: CommentService,
        offers: OfferService,
        offer_id: String,
        author_id: String,
        _temp_dir: TempDir,
    }

    async fn setup() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());

        let users = UserService::new(Arc::clone(&connection));
        let host = users
            .create(CreateUserRequest {
                name: "Keks".to_string(),
                email: "keks@example.com".to_string(),
                avatar_url: "avatar.jpg".to_string(),
                user_type: UserType::Pro,
            })
            .await
            .unwrap();
        CityService::new(Arc::clone(&connection))
            .create(CreateCityRequest {
                name: "Amsterdam".to_string(),
                location: Coordinates { latitude: 52.37, longitude: 4.89 },
            })
            .await
            .unwrap();

        let offers = OfferService::new(Arc::clone(&connection));
        let offer = offers
            .create(CreateOfferRequest {
                name: "Canal View Apartment".to_string(),
                description: "Bright two-room apartment overlooking the canal.".to_string(),
                city: "Amsterdam".to_string(),
                preview_image: "preview.jpg".to_string(),
                images: vec![],
                premium: false,
                housing_type: HousingType::Apartment,
                rooms: 2,
                guests: 4,
                price: 1200,
                amenities: vec![],
                host_id: host.id.clone(),
                location: Coordinates { latitude: 52.37, longitude: 4.89 },
            })
            .await
            .unwrap();

        Fixture {
            comments: CommentService::new(connection),
            offers,
            offer_id: offer.id,
            author_id: host.id,
            _temp_dir: temp_dir,
        }
    }

    fn request(fixture: &Fixture, rating: f64) -> CreateCommentRequest {
        CreateCommentRequest {
            text: "Great stay, would book again.".to_string(),
            rating,
            author_id: fixture.author_id.clone(),
        }
    }

    #[tokio::test]
    async fn create_updates_offer_aggregates() {
        let fixture = setup().await;

        fixture.comments.create(&fixture.offer_id, request(&fixture, 5.0)).await.unwrap().unwrap();
        fixture.comments.create(&fixture.offer_id, request(&fixture, 4.0)).await.unwrap().unwrap();

        let offer = fixture.offers.get(&fixture.offer_id).await.unwrap().unwrap();
        assert_eq!(offer.comment_count, 2);
        assert_eq!(offer.rating, 4.5);

        let comments = fixture.comments.list_for_offer(&fixture.offer_id).await.unwrap().unwrap();
        assert_eq!(comments.len(), 2);
    }

    #[tokio::test]
    async fn unknown_offer_is_none() {
        let fixture = setup().await;
        let created = fixture.comments.create("offer::ghost", request(&fixture, 4.0)).await.unwrap();
        assert!(created.is_none());
        assert!(fixture.comments.list_for_offer("offer::ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn validation_rejects_bad_text_and_rating() {
        let fixture = setup().await;

        let mut short = request(&fixture, 4.0);
        short.text = "Ok".to_string();
        assert!(fixture.comments.create(&fixture.offer_id, short).await.is_err());

        let over = request(&fixture, 5.5);
        assert!(fixture.comments.create(&fixture.offer_id, over).await.is_err());
    }

    #[tokio::test]
    async fn unknown_author_is_rejected() {
        let fixture = setup().await;
        let mut stranger = request(&fixture, 4.0);
        stranger.author_id = "user::stranger".to_string();
        assert!(fixture.comments.create(&fixture.offer_id, stranger).await.is_err());
    }
}
