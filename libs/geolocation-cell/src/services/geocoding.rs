use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_models::geo::Coordinate;

/// Best-effort address lookup for patients who type an address instead of
/// sharing their live location.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Option<Coordinate>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &AppConfig) -> Self {
        // Nominatim rejects anonymous clients
        let client = Client::builder()
            .user_agent(concat!("clinic-discovery/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn lookup(&self, address: &str) -> Result<Option<Coordinate>> {
        let url = format!("{}/search", self.base_url);

        let places: Vec<NominatimPlace> = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let lat: f64 = place.lat.parse().context("latitude is not a number")?;
        let lng: f64 = place.lon.parse().context("longitude is not a number")?;

        Ok(Some(Coordinate::new(lat, lng)?))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Option<Coordinate> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }

        debug!("Geocoding address: {}", address);

        match self.lookup(address).await {
            Ok(Some(coordinate)) => Some(coordinate),
            Ok(None) => {
                debug!("No geocoding match for: {}", address);
                None
            }
            Err(e) => {
                warn!("Geocoding failed for '{}': {}", address, e);
                None
            }
        }
    }
}
