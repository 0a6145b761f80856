use crate::config::{Config, Session};
use crate::filters::{encode, FilterSet};
use crate::models::{ListingResponse, Property};
use crate::search::error::SearchError;
use crate::search::traits::SearchBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const LISTINGS_PATH: &str = "/api/properties";

/// Extra time the HTTP client allows on top of the search timeout, so an
/// overdue search is reported as `SearchError::Timeout` by the executor.
const CLIENT_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

fn request_timeout(search_timeout: Duration) -> Duration {
    search_timeout + CLIENT_TIMEOUT_MARGIN
}

/// HTTP client for the listings search endpoint
pub struct ListingsClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ListingsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout(config.search_timeout))
            .user_agent(concat!("estate-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session: config.session.clone(),
        })
    }

    /// Full request URL for `filters`; the query string is exactly the encoded filter set.
    pub fn search_url(&self, filters: &FilterSet) -> String {
        let query = encode(filters);
        if query.is_empty() {
            format!("{}{}", self.base_url, LISTINGS_PATH)
        } else {
            format!("{}{}?{}", self.base_url, LISTINGS_PATH, query)
        }
    }
}

#[async_trait]
impl SearchBackend for ListingsClient {
    async fn search(&self, filters: &FilterSet) -> Result<Vec<Property>, SearchError> {
        let url = self.search_url(filters);
        debug!("Fetching URL: {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.session.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Listings API returned status: {}", status);
            return Err(SearchError::Status { status, body });
        }

        let body = response.text().await?;
        let properties = serde_json::from_str::<ListingResponse>(&body)?.into_properties();
        info!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    fn source_name(&self) -> &'static str {
        "listings-api"
    }
}
