use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const PEXELS_BASE_URL: &str = "https://api.pexels.com";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/600x400?text=No+Image+Available";
pub const IMAGES_PER_TRIP: usize = 3;

pub fn placeholder_images() -> Vec<String> {
    vec![PLACEHOLDER_IMAGE.to_string(); IMAGES_PER_TRIP]
}

/// Destination photo lookup. Always yields `IMAGES_PER_TRIP` URLs.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    async fn lookup_images(&self, country: &str) -> Vec<String>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSource,
}

#[derive(Debug, Deserialize)]
struct PhotoSource {
    large: String,
}

pub struct PexelsImageService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PexelsImageService {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: PEXELS_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn search(&self, country: &str) -> Result<Vec<String>, String> {
        let query = format!("travel {}", country);
        let per_page = IMAGES_PER_TRIP.to_string();

        let response = self
            .client
            .get(format!("{}/v1/search", self.base_url))
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", "landscape"),
            ])
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("status {}", response.status()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid body: {}", e))?;

        Ok(body.photos.into_iter().map(|photo| photo.src.large).collect())
    }
}

#[async_trait]
impl ImageLookup for PexelsImageService {
    async fn lookup_images(&self, country: &str) -> Vec<String> {
        match self.search(country).await {
            Ok(mut urls) => {
                if urls.len() < IMAGES_PER_TRIP {
                    log::warn!(
                        "Pexels returned {} images for {}, padding with placeholders",
                        urls.len(),
                        country
                    );
                }
                urls.truncate(IMAGES_PER_TRIP);
                urls.resize(IMAGES_PER_TRIP, PLACEHOLDER_IMAGE.to_string());
                urls
            }
            Err(e) => {
                log::warn!("Failed to fetch images from Pexels for {}: {}", country, e);
                placeholder_images()
            }
        }
    }
}
