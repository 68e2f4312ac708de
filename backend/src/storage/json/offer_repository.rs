use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::Offer;
use tracing::{info, warn};

use super::connection::JsonConnection;
use crate::storage::traits::OfferStorage;

const COLLECTION: &str = "offers";

/// JSON-document offer repository.
#[derive(Clone)]
pub struct OfferRepository {
    connection: Arc<JsonConnection>,
}

impl OfferRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl OfferStorage for OfferRepository {
    async fn store_offer(&self, offer: &Offer) -> Result<()> {
        let mut offers: Vec<Offer> = self.connection.read_collection(COLLECTION)?;
        offers.push(offer.clone());
        self.connection.write_collection(COLLECTION, &offers)?;
        info!("Stored offer {}", offer.id);
        Ok(())
    }

    async fn get_offer(&self, offer_id: &str) -> Result<Option<Offer>> {
        let offers: Vec<Offer> = self.connection.read_collection(COLLECTION)?;
        Ok(offers.into_iter().find(|offer| offer.id == offer_id))
    }

    async fn list_offers(&self) -> Result<Vec<Offer>> {
        self.connection.read_collection(COLLECTION)
    }

    async fn update_offer(&self, offer: &Offer) -> Result<()> {
        let mut offers: Vec<Offer> = self.connection.read_collection(COLLECTION)?;
        let slot = offers
            .iter_mut()
            .find(|existing| existing.id == offer.id)
            .ok_or_else(|| anyhow!("Offer not found for update: {}", offer.id))?;
        *slot = offer.clone();
        self.connection.write_collection(COLLECTION, &offers)
    }

    async fn delete_offer(&self, offer_id: &str) -> Result<bool> {
        let mut offers: Vec<Offer> = self.connection.read_collection(COLLECTION)?;
        let before = offers.len();
        offers.retain(|offer| offer.id != offer_id);

        if offers.len() == before {
            warn!("Attempted to delete a non-existent offer: {}", offer_id);
            return Ok(false);
        }

        self.connection.write_collection(COLLECTION, &offers)?;
        info!("Deleted offer {}", offer_id);
        Ok(true)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use shared::{Coordinates, HousingType};
    use tempfile::TempDir;

    pub(crate) fn sample_offer(id: &str) -> Offer {
        Offer {
            id: id.to_string(),
            name: "Quiet loft by the harbour".to_string(),
            description: "Top-floor loft with a workspace and harbour view.".to_string(),
            published_at: chrono::Utc::now(),
            city: "Hamburg".to_string(),
            preview_image: "preview.jpg".to_string(),
            images: vec!["1.jpg".to_string(), "2.jpg".to_string()],
            premium: false,
            favorite: false,
            rating: 4.0,
            housing_type: HousingType::Apartment,
            rooms: 2,
            guests: 3,
            price: 900,
            amenities: vec!["Washer".to_string()],
            host_id: "user::host".to_string(),
            comment_count: 0,
            location: Coordinates { latitude: 53.55, longitude: 9.99 },
        }
    }

    fn setup() -> (OfferRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (OfferRepository::new(connection), temp_dir)
    }

    #[tokio::test]
    async fn store_and_get_round_trips() {
        let (repo, _temp_dir) = setup();
        let offer = sample_offer("offer::1");

        repo.store_offer(&offer).await.unwrap();

        let loaded = repo.get_offer("offer::1").await.unwrap();
        assert_eq!(loaded, Some(offer));
        assert!(repo.get_offer("offer::missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_matching_offer() {
        let (repo, _temp_dir) = setup();
        let mut offer = sample_offer("offer::1");
        repo.store_offer(&offer).await.unwrap();

        offer.price = 1100;
        offer.favorite = true;
        repo.update_offer(&offer).await.unwrap();

        let loaded = repo.get_offer("offer::1").await.unwrap().unwrap();
        assert_eq!(loaded.price, 1100);
        assert!(loaded.favorite);
    }

    #[tokio::test]
    async fn update_of_unknown_offer_fails() {
        let (repo, _temp_dir) = setup();
        let result = repo.update_offer(&sample_offer("offer::ghost")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let (repo, _temp_dir) = setup();
        repo.store_offer(&sample_offer("offer::1")).await.unwrap();

        assert!(repo.delete_offer("offer::1").await.unwrap());
        assert!(!repo.delete_offer("offer::1").await.unwrap());
        assert!(repo.list_offers().await.unwrap().is_empty());
    }
}
