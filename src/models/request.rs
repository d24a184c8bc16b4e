use serde::{Deserialize, Serialize};
use std::fmt;

/// Interests arrive from the trip form either as a single label or a list of labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Interests {
    List(Vec<String>),
    Text(String),
}

impl Default for Interests {
    fn default() -> Self {
        Interests::List(Vec::new())
    }
}

impl Interests {
    /// Normalized form: trimmed labels, comma-joined text split apart, empties dropped.
    pub fn to_list(&self) -> Vec<String> {
        let parts: Vec<&str> = match self {
            Interests::List(items) => items.iter().map(String::as_str).collect(),
            Interests::Text(text) => text.split(',').collect(),
        };

        parts
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn max_len(&self) -> usize {
        match self {
            Interests::List(items) => items.iter().map(|s| s.chars().count()).max().unwrap_or(0),
            Interests::Text(text) => text.chars().count(),
        }
    }

    fn map_text(&self, f: impl Fn(&str) -> String) -> Interests {
        match self {
            Interests::List(items) => Interests::List(items.iter().map(|s| f(s.as_str())).collect()),
            Interests::Text(text) => Interests::Text(f(text)),
        }
    }
}

// A list renders comma-joined, the same text that lands in the prompt.
impl fmt::Display for Interests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interests::List(items) => write!(f, "{}", items.join(",")),
            Interests::Text(text) => write!(f, "{}", text),
        }
    }
}

/*
    Body of POST /generate-itinerary.
    Every field is optional on the wire so a partial body reaches validation
    instead of being rejected by the extractor.
*/
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub country: String,
    pub number_of_days: Option<i64>,
    pub budget: String,
    pub interests: Interests,
    pub travel_style: String,
    pub group_type: String,
    pub user_id: Option<String>,
}

/// A request that passed validation. Only the assembler constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub country: String,
    pub number_of_days: u32,
    pub budget: String,
    pub interests: Interests,
    pub travel_style: String,
    pub group_type: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RequestLimits {
    pub max_trip_days: u32,
    pub max_field_len: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_trip_days: 30,
            max_field_len: 100,
        }
    }
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

impl ItineraryRequest {
    pub fn validate(&self, limits: &RequestLimits) -> Result<ValidatedRequest, String> {
        let user_id = match self.user_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err("missing user id".to_string()),
        };

        let country = sanitize(&self.country);
        if country.is_empty() {
            return Err("country is required".to_string());
        }

        let number_of_days = match self.number_of_days {
            Some(days) if days >= 1 && days <= limits.max_trip_days as i64 => days as u32,
            Some(days) => {
                return Err(format!(
                    "numberOfDays must be between 1 and {}, got {}",
                    limits.max_trip_days, days
                ))
            }
            None => return Err("numberOfDays is required".to_string()),
        };

        let budget = sanitize(&self.budget);
        let travel_style = sanitize(&self.travel_style);
        let group_type = sanitize(&self.group_type);
        let interests = self.interests.map_text(sanitize);

        for (field, len) in [
            ("country", country.chars().count()),
            ("budget", budget.chars().count()),
            ("travelStyle", travel_style.chars().count()),
            ("groupType", group_type.chars().count()),
            ("interests", interests.max_len()),
        ] {
            if len > limits.max_field_len {
                return Err(format!(
                    "{} exceeds {} characters",
                    field, limits.max_field_len
                ));
            }
        }

        Ok(ValidatedRequest {
            country,
            number_of_days,
            budget,
            interests,
            travel_style,
            group_type,
            user_id,
        })
    }
}
