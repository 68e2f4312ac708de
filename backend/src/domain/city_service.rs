use std::sync::Arc;

use anyhow::{bail, Result};
use shared::{City, Coordinates, CreateCityRequest};
use tracing::info;

use super::ids;
use crate::storage::json::{CityRepository, JsonConnection};
use crate::storage::traits::CityStorage;

/// Service for managing the cities offers can be listed in.
#[derive(Clone)]
pub struct CityService {
    city_repository: CityRepository,
}

impl CityService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { city_repository: CityRepository::new(connection) }
    }

    /// Register a new city. Names are unique.
    pub async fn create(&self, request: CreateCityRequest) -> Result<City> {
        let name = request.name.trim();
        if name.is_empty() {
            bail!("City name must not be empty");
        }
        if self.city_repository.find_city_by_name(name).await?.is_some() {
            bail!("City {} already exists", name);
        }

        let city = City {
            id: ids::new_id("city"),
            name: name.to_string(),
            location: request.location,
        };
        self.city_repository.store_city(&city).await?;

        info!("Created city {} with ID {}", city.name, city.id);
        Ok(city)
    }

    pub async fn get(&self, city_id: &str) -> Result<Option<City>> {
        self.city_repository.get_city(city_id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<City>> {
        self.city_repository.find_city_by_name(name).await
    }

    pub async fn list(&self) -> Result<Vec<City>> {
        self.city_repository.list_cities().await
    }

    /// Look the city up by name, registering it on first sight. Import
    /// rows carry no city center, so a city created here takes the
    /// offer's location.
    pub async fn find_or_create(&self, name: &str, location: Coordinates) -> Result<City> {
        if let Some(existing) = self.city_repository.find_city_by_name(name).await? {
            return Ok(existing);
        }

        let city = City { id: ids::new_id("city"), name: name.to_string(), location };
        self.city_repository.store_city(&city).await?;
        info!("Registered city {} during import", city.name);
        Ok(city)
    }
}
