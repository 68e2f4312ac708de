use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::models::OfferRecord;
use super::{CityService, OfferService, UserService};
use crate::import::RecordSink;
use crate::storage::json::JsonConnection;

/// Persistence sink for the bulk-import pipeline.
///
/// Each record resolves its city and host against the store (registering
/// them on first sight) before the offer itself is written.
#[derive(Clone)]
pub struct ImportService {
    city_service: CityService,
    user_service: UserService,
    offer_service: OfferService,
}

impl ImportService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            city_service: CityService::new(Arc::clone(&connection)),
            user_service: UserService::new(Arc::clone(&connection)),
            offer_service: OfferService::new(connection),
        }
    }
}

#[async_trait]
impl RecordSink for ImportService {
    async fn persist(&self, record: OfferRecord) -> Result<()> {
        let city = self.city_service.find_or_create(&record.city, record.location).await?;
        let host = self.user_service.find_or_create(&record.host).await?;

        let offer = self.offer_service.store_imported(record, &city.name, &host.id).await?;
        debug!("Imported offer {}", offer.id);
        Ok(())
    }
}
