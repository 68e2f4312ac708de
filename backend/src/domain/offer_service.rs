use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use shared::{CreateOfferRequest, Offer, OfferSummary, UpdateOfferRequest};
use tracing::{info, warn};

use super::ids;
use super::models::OfferRecord;
use crate::storage::json::{
    CityRepository, CommentRepository, JsonConnection, OfferRepository, UserRepository,
};
use crate::storage::traits::{CityStorage, CommentStorage, OfferStorage, UserStorage};

const MIN_NAME_LEN: usize = 10;
const MAX_NAME_LEN: usize = 100;
const MIN_DESCRIPTION_LEN: usize = 20;
const MAX_DESCRIPTION_LEN: usize = 1024;
const MIN_ROOMS: u8 = 1;
const MAX_ROOMS: u8 = 8;
const MIN_GUESTS: u8 = 1;
const MAX_GUESTS: u8 = 10;
const MIN_PRICE: u32 = 100;
const MAX_PRICE: u32 = 100_000;

/// Default page size for offer listings.
const DEFAULT_LIST_LIMIT: u32 = 60;

/// Initial rating of an offer that has no comments yet.
const INITIAL_RATING: f64 = 1.0;

/// Service for managing rental offers.
#[derive(Clone)]
pub struct OfferService {
    offer_repository: OfferRepository,
    comment_repository: CommentRepository,
    user_repository: UserRepository,
    city_repository: CityRepository,
}

impl OfferService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            offer_repository: OfferRepository::new(Arc::clone(&connection)),
            comment_repository: CommentRepository::new(Arc::clone(&connection)),
            user_repository: UserRepository::new(Arc::clone(&connection)),
            city_repository: CityRepository::new(connection),
        }
    }

    /// List offers, optionally filtered to one city, premium offers first
    /// and newest first within each group.
    pub async fn list(&self, city: Option<&str>, limit: Option<u32>) -> Result<Vec<OfferSummary>> {
        let mut offers = self.offer_repository.list_offers().await?;

        if let Some(city) = city {
            offers.retain(|offer| offer.city.eq_ignore_ascii_case(city));
        }

        offers.sort_by(|a, b| {
            b.premium
                .cmp(&a.premium)
                .then(b.published_at.cmp(&a.published_at))
        });
        offers.truncate(limit.unwrap_or(DEFAULT_LIST_LIMIT) as usize);

        Ok(offers.iter().map(OfferSummary::from).collect())
    }

    /// Create a new offer from an API request.
    pub async fn create(&self, request: CreateOfferRequest) -> Result<Offer> {
        info!("Creating offer: {}", request.name);
        Self::validate_create(&request)?;

        if self.user_repository.get_user(&request.host_id).await?.is_none() {
            bail!("Host not found: {}", request.host_id);
        }
        if self.city_repository.find_city_by_name(&request.city).await?.is_none() {
            bail!("Unknown city: {}", request.city);
        }

        let offer = Offer {
            id: ids::new_id("offer"),
            name: request.name.trim().to_string(),
            description: request.description.trim().to_string(),
            published_at: Utc::now(),
            city: request.city,
            preview_image: request.preview_image,
            images: request.images,
            premium: request.premium,
            favorite: false,
            rating: INITIAL_RATING,
            housing_type: request.housing_type,
            rooms: request.rooms,
            guests: request.guests,
            price: request.price,
            amenities: request.amenities,
            host_id: request.host_id,
            comment_count: 0,
            location: request.location,
        };
        self.offer_repository.store_offer(&offer).await?;

        info!("Created offer {} with ID {}", offer.name, offer.id);
        Ok(offer)
    }

    /// Persist an imported record. Import rows were type-coerced by the
    /// parser and keep their file-supplied rating, comment count, and
    /// publish date; the API range checks do not apply to them.
    pub async fn store_imported(
        &self,
        record: OfferRecord,
        city_name: &str,
        host_id: &str,
    ) -> Result<Offer> {
        let offer = Offer {
            id: ids::new_id("offer"),
            name: record.name,
            description: record.description,
            published_at: record.published_at,
            city: city_name.to_string(),
            preview_image: record.preview_image,
            images: record.images,
            premium: record.premium,
            favorite: record.favorite,
            rating: record.rating,
            housing_type: record.housing_type,
            rooms: record.rooms,
            guests: record.guests,
            price: record.price,
            amenities: record.amenities,
            host_id: host_id.to_string(),
            comment_count: record.comment_count,
            location: record.location,
        };
        self.offer_repository.store_offer(&offer).await?;
        Ok(offer)
    }

    pub async fn get(&self, offer_id: &str) -> Result<Option<Offer>> {
        let offer = self.offer_repository.get_offer(offer_id).await?;
        if offer.is_none() {
            warn!("Offer not found: {}", offer_id);
        }
        Ok(offer)
    }

    /// Apply a partial update. Returns `None` when the offer is unknown.
    pub async fn update(
        &self,
        offer_id: &str,
        request: UpdateOfferRequest,
    ) -> Result<Option<Offer>> {
        let Some(mut offer) = self.offer_repository.get_offer(offer_id).await? else {
            return Ok(None);
        };

        Self::validate_update(&request)?;

        if let Some(name) = request.name {
            offer.name = name.trim().to_string();
        }
        if let Some(description) = request.description {
            offer.description = description.trim().to_string();
        }
        if let Some(preview_image) = request.preview_image {
            offer.preview_image = preview_image;
        }
        if let Some(images) = request.images {
            offer.images = images;
        }
        if let Some(premium) = request.premium {
            offer.premium = premium;
        }
        if let Some(favorite) = request.favorite {
            offer.favorite = favorite;
        }
        if let Some(housing_type) = request.housing_type {
            offer.housing_type = housing_type;
        }
        if let Some(rooms) = request.rooms {
            offer.rooms = rooms;
        }
        if let Some(guests) = request.guests {
            offer.guests = guests;
        }
        if let Some(price) = request.price {
            offer.price = price;
        }
        if let Some(amenities) = request.amenities {
            offer.amenities = amenities;
        }

        self.offer_repository.update_offer(&offer).await?;
        info!("Updated offer {}", offer.id);
        Ok(Some(offer))
    }

    /// Delete an offer and every comment attached to it.
    pub async fn delete(&self, offer_id: &str) -> Result<bool> {
        let deleted = self.offer_repository.delete_offer(offer_id).await?;
        if deleted {
            let removed = self.comment_repository.delete_comments_for_offer(offer_id).await?;
            info!("Deleted offer {} and {} comments", offer_id, removed);
        }
        Ok(deleted)
    }

    fn validate_create(request: &CreateOfferRequest) -> Result<()> {
        Self::check_name(request.name.trim())?;
        Self::check_description(request.description.trim())?;
        Self::check_rooms(request.rooms)?;
        Self::check_guests(request.guests)?;
        Self::check_price(request.price)?;
        Ok(())
    }

    fn validate_update(request: &UpdateOfferRequest) -> Result<()> {
        if let Some(name) = &request.name {
            Self::check_name(name.trim())?;
        }
        if let Some(description) = &request.description {
            Self::check_description(description.trim())?;
        }
        if let Some(rooms) = request.rooms {
            Self::check_rooms(rooms)?;
        }
        if let Some(guests) = request.guests {
            Self::check_guests(guests)?;
        }
        if let Some(price) = request.price {
            Self::check_price(price)?;
        }
        Ok(())
    }

    fn check_name(name: &str) -> Result<()> {
        let len = name.chars().count();
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
            bail!("Offer name must be {} to {} characters", MIN_NAME_LEN, MAX_NAME_LEN);
        }
        Ok(())
    }

    fn check_description(description: &str) -> Result<()> {
        let len = description.chars().count();
        if !(MIN_DESCRIPTION_LEN..=MAX_DESCRIPTION_LEN).contains(&len) {
            bail!(
                "Offer description must be {} to {} characters",
                MIN_DESCRIPTION_LEN,
                MAX_DESCRIPTION_LEN
            );
        }
        Ok(())
    }

    fn check_rooms(rooms: u8) -> Result<()> {
        if !(MIN_ROOMS..=MAX_ROOMS).contains(&rooms) {
            bail!("Rooms must be {} to {}", MIN_ROOMS, MAX_ROOMS);
        }
        Ok(())
    }

    fn check_guests(guests: u8) -> Result<()> {
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&guests) {
            bail!("Guests must be {} to {}", MIN_GUESTS, MAX_GUESTS);
        }
        Ok(())
    }

    fn check_price(price: u32) -> Result<()> {
        if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
            bail!("Price must be {} to {}", MIN_PRICE, MAX_PRICE);
        }
        Ok(())
    }
}
