use crate::decode::decode_values;
use crate::request::normalize_postcode;
use crate::traits::RestaurantSource;
use crate::{FetchError, FetchRequest, Location, RestaurantRecord};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Offline stand-in for the search backend.
///
/// Holds a fixed restaurant list and a postcode-to-origin table, and filters
/// the list the way the backend does: test restaurants are dropped, distance
/// and minimum rating default to 3 when not supplied.
#[derive(Debug, Clone, Default)]
pub struct CatalogRestaurantSource {
    records: Vec<RestaurantRecord>,
    origins: HashMap<String, Location>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    origins: HashMap<String, Location>,
    #[serde(default)]
    restaurants: Vec<Value>,
}

impl CatalogRestaurantSource {
    pub fn new(records: Vec<RestaurantRecord>) -> Self {
        Self {
            records,
            origins: HashMap::new(),
        }
    }

    pub fn with_origin(mut self, postcode: &str, origin: Location) -> Result<Self, FetchError> {
        self.origins.insert(normalize_postcode(postcode)?, origin);
        Ok(self)
    }

    /// Loads `{"origins": {postcode: location}, "restaurants": [record]}`.
    pub async fn from_json_file(path: &Path) -> Result<Self, FetchError> {
        let bytes = tokio::fs::read(path).await?;
        let file: CatalogFile = serde_json::from_slice(&bytes)?;

        let mut catalog = Self::new(decode_values(file.restaurants));
        for (postcode, origin) in file.origins {
            catalog = catalog.with_origin(&postcode, origin)?;
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RestaurantSource for CatalogRestaurantSource {
    async fn fetch_restaurants(
        &self,
        request: &FetchRequest,
    ) -> Result<Vec<RestaurantRecord>, FetchError> {
        let postcode = normalize_postcode(&request.postcode)?;
        let origin = self
            .origins
            .get(&postcode)
            .copied()
            .ok_or(FetchError::UnknownPostcode(postcode))?;

        let criteria = request.criteria.with_backend_defaults();
        Ok(self
            .records
            .iter()
            .filter(|record| !record.is_test_restaurant)
            .filter(|record| criteria.matches(record, origin))
            .cloned()
            .collect())
    }
}
