use crate::decode::decode_records;
use crate::traits::RestaurantSource;
use crate::{FetchError, FetchRequest, RestaurantRecord};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Restaurant search backend reached over HTTP.
pub struct HttpRestaurantSource {
    client: Arc<Client>,
    base_url: Url,
}

impl HttpRestaurantSource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client: Arc::new(Client::new()),
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl RestaurantSource for HttpRestaurantSource {
    async fn fetch_restaurants(
        &self,
        request: &FetchRequest,
    ) -> Result<Vec<RestaurantRecord>, FetchError> {
        let url = request.request_url(&self.base_url)?;
        debug!(%url, "fetching restaurants");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(FetchError::BackendResponse {
                status: status.as_u16(),
                details,
            });
        }

        let body = response.bytes().await?;
        decode_records(&body)
    }
}
