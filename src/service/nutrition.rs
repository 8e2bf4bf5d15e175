//! Nutrition lookup API client service
//!
//! Fetches nutrition facts for a food name from the API-Ninjas nutrition endpoint.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::model::NutritionFacts;

const NUTRITION_API_BASE_URL: &str = "https://api.api-ninjas.com/v1/nutrition";
const ENV_NUTRITION_BASE_URL: &str = "NUTRITION_BASE_URL";

const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, thiserror::Error)]
pub enum NutritionApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Lookup capability consumed by the resolver
///
/// `Ok` with an empty vec is a valid "no match" outcome. Every error is
/// recoverable per-candidate from the resolver's point of view.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn query(&self, food_name: &str) -> Result<Vec<NutritionFacts>, NutritionApiError>;
}

/// Client for the API-Ninjas nutrition endpoint
pub struct NinjasClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NinjasClient {
    /// Create a new nutrition client with a bounded per-request timeout
    ///
    /// The base URL is resolved in this order:
    /// 1. `NUTRITION_BASE_URL` environment variable if set
    /// 2. Default API-Ninjas endpoint
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, NutritionApiError> {
        let resolved_url = env::var(ENV_NUTRITION_BASE_URL)
            .ok()
            .unwrap_or_else(|| NUTRITION_API_BASE_URL.to_string());

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: resolved_url,
            api_key: api_key.trim().to_string(),
        })
    }
}

#[async_trait]
impl NutritionLookup for NinjasClient {
    /// Query nutrition facts for a food name
    ///
    /// The response body is a JSON array; an empty array means the provider has
    /// no match for this name.
    async fn query(&self, food_name: &str) -> Result<Vec<NutritionFacts>, NutritionApiError> {
        tracing::debug!(food = %food_name, url = %self.base_url, "Querying nutrition provider");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", food_name)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NutritionApiError::UnexpectedStatus { status, body });
        }

        let facts: Vec<NutritionFacts> = response.json().await.map_err(|e| {
            NutritionApiError::ParseError(format!("Failed to deserialize nutrition response: {}", e))
        })?;

        tracing::debug!(food = %food_name, results = facts.len(), "Nutrition lookup complete");

        Ok(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access and NUTRITION_API_KEY
    async fn test_query_known_food() {
        let api_key = std::env::var("NUTRITION_API_KEY").expect("NUTRITION_API_KEY not set");
        let client = NinjasClient::new(&api_key, Duration::from_secs(10)).unwrap();
        let result = client.query("apple").await;
        assert!(result.is_ok());
    }
}
