use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use shared::City;
use tracing::info;

use super::connection::JsonConnection;
use crate::storage::traits::CityStorage;

const COLLECTION: &str = "cities";

/// JSON-document city repository.
#[derive(Clone)]
pub struct CityRepository {
    connection: Arc<JsonConnection>,
}

impl CityRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CityStorage for CityRepository {
    async fn store_city(&self, city: &City) -> Result<()> {
        let mut cities: Vec<City> = self.connection.read_collection(COLLECTION)?;
        cities.push(city.clone());
        self.connection.write_collection(COLLECTION, &cities)?;
        info!("Stored city {} ({})", city.name, city.id);
        Ok(())
    }

    async fn get_city(&self, city_id: &str) -> Result<Option<City>> {
        let cities: Vec<City> = self.connection.read_collection(COLLECTION)?;
        Ok(cities.into_iter().find(|city| city.id == city_id))
    }

    async fn find_city_by_name(&self, name: &str) -> Result<Option<City>> {
        let cities: Vec<City> = self.connection.read_collection(COLLECTION)?;
        Ok(cities.into_iter().find(|city| city.name.eq_ignore_ascii_case(name)))
    }

    async fn list_cities(&self) -> Result<Vec<City>> {
        let mut cities: Vec<City> = self.connection.read_collection(COLLECTION)?;
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }
}
