use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::models::request::RequestLimits;
use crate::services::gemini_service::{DEFAULT_GEMINI_MODEL, GEMINI_BASE_URL};
use crate::services::image_service::PEXELS_BASE_URL;
use crate::services::itinerary_generation_service::ItineraryGenerationConfig;
use crate::services::retry_policy::RetryPolicy;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "Travel";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout: Duration,
    pub pexels_api_key: String,
    pub pexels_base_url: String,
    pub pexels_timeout: Duration,
    pub model_max_retries: u32,
    pub model_retry_base_delay: Duration,
    pub max_trip_days: u32,
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Invalid { key, value }),
        },
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_trip_days = parsed("MAX_TRIP_DAYS", RequestLimits::default().max_trip_days)?;
        if max_trip_days == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_TRIP_DAYS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: or_default("HOST", HOST),
            port: parsed("PORT", PORT)?,
            mongo_uri: required("MONGODB_URI")?,
            mongo_database: or_default("MONGODB_DATABASE", DATABASE),
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: or_default("GEMINI_BASE_URL", GEMINI_BASE_URL),
            gemini_timeout: Duration::from_secs(parsed("GEMINI_TIMEOUT_SECS", 60u64)?),
            pexels_api_key: or_default("PEXELS_API_KEY", ""),
            pexels_base_url: or_default("PEXELS_BASE_URL", PEXELS_BASE_URL),
            pexels_timeout: Duration::from_secs(parsed("PEXELS_TIMEOUT_SECS", 10u64)?),
            model_max_retries: parsed("MODEL_MAX_RETRIES", RetryPolicy::default().max_retries)?,
            model_retry_base_delay: Duration::from_millis(parsed(
                "MODEL_RETRY_BASE_DELAY_MS",
                1000u64,
            )?),
            max_trip_days,
        })
    }

    pub fn generation_config(&self) -> ItineraryGenerationConfig {
        ItineraryGenerationConfig {
            retry: RetryPolicy::new(self.model_max_retries, self.model_retry_base_delay),
            limits: RequestLimits {
                max_trip_days: self.max_trip_days,
                ..RequestLimits::default()
            },
        }
    }
}
