use crate::config::GeocodingSettings;
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when resolving an address
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    ApiError(String),

    #[error("Geocoding not configured: missing API key")]
    NotConfigured,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Address-to-coordinates lookup
///
/// `Ok(None)` means the service answered but knows no such place.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

/// Geocoding API client
///
/// Speaks the Google Geocoding JSON protocol. Each address costs at most one
/// round trip: answers, including "no result", are memoised for the
/// configured TTL and failures are never retried.
pub struct HttpGeocoder {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
    cache: moka::future::Cache<String, Option<Coordinates>>,
}

impl HttpGeocoder {
    /// Create a new geocoder client
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
        cache_size: u64,
        cache_ttl: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(timeout).build()?;

        let cache = moka::future::CacheBuilder::new(cache_size)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            endpoint,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
            cache,
        })
    }

    pub fn from_settings(settings: &GeocodingSettings) -> Result<Self, GeocodeError> {
        Self::new(
            settings.endpoint.clone(),
            settings.api_key.clone(),
            Duration::from_secs(settings.timeout_secs),
            settings.cache_size,
            Duration::from_secs(settings.cache_ttl_secs),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn lookup(&self, address: &str, api_key: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let url = format!(
            "{}?address={}&key={}",
            self.endpoint,
            urlencoding::encode(address),
            urlencoding::encode(api_key)
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Lookup failed with HTTP {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let status = json
            .get("status")
            .and_then(|s| s.as_str())
            .ok_or_else(|| GeocodeError::InvalidResponse("Missing status".into()))?;

        match status {
            "OK" => {}
            "ZERO_RESULTS" => return Ok(None),
            other => {
                let message = json
                    .get("error_message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("no details");
                return Err(GeocodeError::ApiError(format!("{}: {}", other, message)));
            }
        }

        let location = json
            .get("results")
            .and_then(|r| r.as_array())
            .and_then(|r| r.first())
            .and_then(|r| r.pointer("/geometry/location"));

        let Some(location) = location else {
            return Ok(None);
        };

        let lat = location.get("lat").and_then(|v| v.as_f64());
        let lng = location.get("lng").and_then(|v| v.as_f64());

        match (lat, lng) {
            (Some(lat), Some(lng)) => Ok(Some(Coordinates::new(lat, lng))),
            _ => Err(GeocodeError::InvalidResponse(
                "Result location lacks lat/lng".into(),
            )),
        }
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let api_key = self.api_key.as_deref().ok_or(GeocodeError::NotConfigured)?;

        let address = address.trim();
        let cache_key = address.to_lowercase();

        if let Some(hit) = self.cache.get(&cache_key).await {
            tracing::trace!("Geocode cache hit: {}", cache_key);
            return Ok(hit);
        }

        let coordinates = self.lookup(address, api_key).await?;
        self.cache.insert(cache_key, coordinates).await;

        tracing::debug!("Geocoded {:?} -> {:?}", address, coordinates);
        Ok(coordinates)
    }
}
