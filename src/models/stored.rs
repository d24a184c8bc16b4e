use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::itinerary::{DayPlan, GeneratedItinerary, TripLocation};

/// Document shape of the `itineraries` collection.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub country: String,
    pub estimated_price: String,
    pub duration: u32,
    pub budget: String,
    pub travel_style: String,
    pub group_type: String,
    pub interests: Vec<String>,
    pub images: Vec<String>,
    pub best_time_to_visit: Vec<String>,
    pub weather_info: Vec<String>,
    pub location: TripLocation,
    pub itinerary: Vec<DayPlan>,
    pub created_at: mongodb::bson::DateTime,
}

impl ItineraryDocument {
    pub fn from_generated(generated: &GeneratedItinerary, user_id: &str) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            name: generated.name.clone(),
            description: generated.description.clone(),
            country: generated.country.clone(),
            estimated_price: generated.estimated_price.clone(),
            duration: generated.duration,
            budget: generated.budget.clone(),
            travel_style: generated.travel_style.clone(),
            group_type: generated.group_type.clone(),
            interests: generated.interests.clone(),
            images: generated.images.clone(),
            best_time_to_visit: generated.best_time_to_visit.clone(),
            weather_info: generated.weather_info.clone(),
            location: generated.location.clone(),
            itinerary: generated.itinerary.clone(),
            created_at: mongodb::bson::DateTime::now(),
        }
    }

    pub fn into_stored(self, id: ObjectId) -> StoredItinerary {
        StoredItinerary {
            id: id.to_hex(),
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            country: self.country,
            estimated_price: self.estimated_price,
            duration: self.duration,
            budget: self.budget,
            travel_style: self.travel_style,
            group_type: self.group_type,
            interests: self.interests,
            images: self.images,
            best_time_to_visit: self.best_time_to_visit,
            weather_info: self.weather_info,
            location: self.location,
            itinerary: self.itinerary,
            created_at: self.created_at.to_chrono(),
        }
    }
}

/// A persisted itinerary as returned to API clients.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StoredItinerary {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub country: String,
    pub estimated_price: String,
    pub duration: u32,
    pub budget: String,
    pub travel_style: String,
    pub group_type: String,
    pub interests: Vec<String>,
    pub images: Vec<String>,
    pub best_time_to_visit: Vec<String>,
    pub weather_info: Vec<String>,
    pub location: TripLocation,
    pub itinerary: Vec<DayPlan>,
    pub created_at: DateTime<Utc>,
}

/// Equality filter over the trip traits used to find related trips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitFilter {
    pub budget: Option<String>,
    pub travel_style: Option<String>,
    pub group_type: Option<String>,
}

impl TraitFilter {
    pub fn matches(&self, itinerary: &StoredItinerary) -> bool {
        self.budget.as_ref().map_or(true, |b| *b == itinerary.budget)
            && self
                .travel_style
                .as_ref()
                .map_or(true, |s| *s == itinerary.travel_style)
            && self
                .group_type
                .as_ref()
                .map_or(true, |g| *g == itinerary.group_type)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ItineraryPage {
    pub itineraries: Vec<StoredItinerary>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}
