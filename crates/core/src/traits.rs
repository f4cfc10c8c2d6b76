use crate::{FetchError, FetchRequest, RestaurantRecord};
use async_trait::async_trait;

/// Where the working set comes from.
#[async_trait]
pub trait RestaurantSource {
    async fn fetch_restaurants(
        &self,
        request: &FetchRequest,
    ) -> Result<Vec<RestaurantRecord>, FetchError>;
}
