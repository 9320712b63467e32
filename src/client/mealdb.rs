use crate::client::MealSource;
use crate::config::{BrowserConfig, DEFAULT_BASE_URL};
use crate::error::BrowserError;
use crate::model::{Area, Category, MealDetail, MealSummary, MealsEnvelope};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for TheMealDB JSON API
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a client from configuration
    pub fn new(config: &BrowserConfig) -> Result<Self, BrowserError> {
        Self::build(config.base_url.clone(), config.request_timeout())
    }

    /// Create a client for a custom endpoint (proxies, mock servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, BrowserError> {
        Self::build(base_url.into(), Duration::from_secs(30))
    }

    fn build(base_url: String, timeout: Duration) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; CheforaBot/1.0)")
            .build()?;

        Ok(MealDbClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<MealsEnvelope<T>, BrowserError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::StatusError(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for MealDbClient {
    fn default() -> Self {
        MealDbClient {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl MealSource for MealDbClient {
    fn source_name(&self) -> &str {
        "themealdb"
    }

    async fn try_by_ingredient(&self, term: &str) -> Result<Vec<MealSummary>, BrowserError> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.get("filter.php", &[("i", term)]).await?.into_vec())
    }

    async fn try_by_category(&self, category: &str) -> Result<Vec<MealSummary>, BrowserError> {
        Ok(self.get("filter.php", &[("c", category)]).await?.into_vec())
    }

    async fn try_by_area(&self, area: &str) -> Result<Vec<MealSummary>, BrowserError> {
        Ok(self.get("filter.php", &[("a", area)]).await?.into_vec())
    }

    async fn try_categories(&self) -> Result<Vec<Category>, BrowserError> {
        Ok(self.get("list.php", &[("c", "list")]).await?.into_vec())
    }

    async fn try_areas(&self) -> Result<Vec<Area>, BrowserError> {
        Ok(self.get("list.php", &[("a", "list")]).await?.into_vec())
    }

    async fn try_lookup(&self, id: &str) -> Result<Option<MealDetail>, BrowserError> {
        Ok(self.get("lookup.php", &[("i", id)]).await?.into_first())
    }

    async fn try_random(&self) -> Result<Option<MealDetail>, BrowserError> {
        Ok(self.get("random.php", &[]).await?.into_first())
    }
}
