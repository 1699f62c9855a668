use crate::config::AppConfig;
use crate::model::{FetchError, RawListing};
use crate::source::traits::ListingSource;

use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

pub struct ApiClient {
    client: Client,
    listings_url: String,
    listing_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            listings_url: config.listings_url.clone(),
            listing_url: config.listing_url.clone(),
        })
    }

    fn build_url(&self, id: &str) -> String {
        listing_endpoint(&self.listing_url, id)
    }

    async fn get_json(&self, url: &str) -> Result<Option<Value>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!("Upstream responded [{}] for {}", status, url);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
        Ok(Some(body))
    }
}

#[async_trait::async_trait]
impl ListingSource for ApiClient {
    async fn fetch_all(&self) -> Result<Vec<RawListing>, FetchError> {
        info!("Fetching listings from {}", self.listings_url);
        let body = self
            .get_json(&self.listings_url)
            .await?
            .ok_or(FetchError::Status(StatusCode::NOT_FOUND.as_u16()))?;
        let listings = listings_from_body(body)?;
        info!("Fetched {} listings", listings.len());
        Ok(listings)
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<RawListing>, FetchError> {
        let url = self.build_url(id);
        info!("Fetching listing {}", id);
        Ok(self.get_json(&url).await?.and_then(single_from_body))
    }
}

pub fn listing_endpoint(base: &str, id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}

pub fn listings_from_body(body: Value) -> Result<Vec<RawListing>, FetchError> {
    match body {
        Value::Array(items) => Ok(items.into_iter().map(RawListing::from_json).collect()),
        other => Err(FetchError::InvalidResponse(format!(
            "expected a list of listings, got {}",
            json_kind(&other)
        ))),
    }
}

/// The single-listing endpoint answers with the object itself or a one-element list.
pub fn single_from_body(body: Value) -> Option<RawListing> {
    match body {
        Value::Null => None,
        Value::Array(items) => items.into_iter().next().map(RawListing::from_json),
        other => Some(RawListing::from_json(other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let expected = "https://api.example.com/lst/17";
        assert_eq!(listing_endpoint("https://api.example.com/lst/", "17"), expected);
        assert_eq!(listing_endpoint("https://api.example.com/lst", "17"), expected);
    }

    #[test]
    fn list_body_must_be_array() {
        let ok = listings_from_body(json!([{ "id": "a" }, { "id": "b" }])).unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok[1].id.as_deref(), Some("b"));

        let err = listings_from_body(json!({ "data": [] })).unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(_)));
    }

    #[test]
    fn single_body_unwraps_array_or_object() {
        assert_eq!(single_from_body(json!([{ "id": "x" }])).unwrap().id.as_deref(), Some("x"));
        assert_eq!(single_from_body(json!({ "id": "y" })).unwrap().id.as_deref(), Some("y"));
        assert!(single_from_body(json!([])).is_none());
        assert!(single_from_body(Value::Null).is_none());
    }
}
