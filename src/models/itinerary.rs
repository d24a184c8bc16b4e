use serde::{Deserialize, Deserializer, Serialize};

use crate::models::request::Interests;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub time: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DayPlan {
    pub day: u32,
    pub location: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TripLocation {
    pub city: String,
    /// [latitude, longitude]
    pub coordinates: [f64; 2],
    #[serde(rename = "openStreetMap")]
    pub open_street_map: String,
}

fn interests_as_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Interests::deserialize(deserializer).map(|interests| interests.to_list())
}

/// The itinerary the model is asked to produce, in the model's camelCase shape.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItinerary {
    pub name: String,
    pub description: String,
    pub estimated_price: String,
    pub duration: u32,
    pub budget: String,
    pub travel_style: String,
    pub country: String,
    #[serde(deserialize_with = "interests_as_list")]
    pub interests: Vec<String>,
    pub group_type: String,
    // Filled by the image lookup, whatever the model put here is overwritten.
    #[serde(default)]
    pub images: Vec<String>,
    pub best_time_to_visit: Vec<String>,
    pub weather_info: Vec<String>,
    pub location: TripLocation,
    pub itinerary: Vec<DayPlan>,
}
