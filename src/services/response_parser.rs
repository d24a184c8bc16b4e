use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

use crate::error::ItineraryError;
use crate::models::itinerary::GeneratedItinerary;

// Opening fences may carry a language label (```json, ```JSON, ```javascript).
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n?").unwrap());
static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n?```\s*$").unwrap());

/// Strips a leading and trailing code fence and surrounding whitespace.
pub fn clean_model_text(raw: &str) -> String {
    let without_open = OPENING_FENCE.replace(raw, "");
    let without_close = CLOSING_FENCE.replace(&without_open, "");
    without_close.trim().to_string()
}

/// Parses cleaned model text into `T`, keeping the cleaned text for diagnostics on failure.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T, ItineraryError> {
    let cleaned = clean_model_text(raw);
    serde_json::from_str(&cleaned).map_err(|e| ItineraryError::Parse {
        reason: e.to_string(),
        cleaned,
    })
}

pub fn parse_itinerary(raw: &str) -> Result<GeneratedItinerary, ItineraryError> {
    parse_model_json(raw)
}
