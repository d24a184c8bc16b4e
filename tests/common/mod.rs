#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use trip_planner_api::error::{ModelError, StoreError};
use trip_planner_api::models::itinerary::GeneratedItinerary;
use trip_planner_api::models::stored::{ItineraryDocument, StoredItinerary, TraitFilter};
use trip_planner_api::routes::{self, AppState};
use trip_planner_api::services::gemini_service::TextModel;
use trip_planner_api::services::image_service::ImageLookup;
use trip_planner_api::services::itinerary_generation_service::{
    ItineraryGenerationConfig, ItineraryGenerator,
};
use trip_planner_api::services::itinerary_store::ItineraryStore;
use trip_planner_api::services::retry_policy::RetryPolicy;

/// Model fake that plays back scripted replies; the last reply repeats once the script runs out.
pub struct FakeModel {
    replies: Mutex<Vec<Result<String, ModelError>>>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn scripted(replies: Vec<Result<String, ModelError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::scripted(vec![Ok(text.to_string())])
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Self::scripted(vec![Err(ModelError::new(Some(status), message))])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextModel for FakeModel {
    async fn generate_text(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies
                .first()
                .cloned()
                .unwrap_or_else(|| Err(ModelError::new(None, "no scripted reply")))
        }
    }
}

pub struct FakeImages {
    urls: Vec<String>,
    pub calls: AtomicUsize,
}

impl FakeImages {
    pub fn returning(urls: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageLookup for FakeImages {
    async fn lookup_images(&self, _country: &str) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.clone()
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    pub records: Mutex<Vec<StoredItinerary>>,
    pub saves: AtomicUsize,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
    pub match_limits: Mutex<Vec<usize>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<StoredItinerary> {
        self.records.lock().unwrap().clone()
    }

    pub fn insert(&self, record: StoredItinerary) {
        self.records.lock().unwrap().push(record);
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(StoreError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ItineraryStore for InMemoryStore {
    async fn save(
        &self,
        itinerary: &GeneratedItinerary,
        user_id: &str,
    ) -> Result<StoredItinerary, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError("duplicate key value violates unique constraint".to_string()));
        }

        let record = ItineraryDocument::from_generated(itinerary, user_id).into_stored(ObjectId::new());
        self.insert(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredItinerary>, StoreError> {
        self.check_reads()?;
        Ok(self.records().into_iter().find(|r| r.id == id))
    }

    async fn list(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<StoredItinerary>, u64), StoreError> {
        self.check_reads()?;
        let mut records = self.records();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = records.len() as u64;
        let skip = ((page - 1) * per_page) as usize;
        Ok((records.into_iter().skip(skip).take(per_page as usize).collect(), total))
    }

    async fn find_matching(
        &self,
        filter: &TraitFilter,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredItinerary>, StoreError> {
        self.check_reads()?;
        self.match_limits.lock().unwrap().push(limit);
        Ok(self
            .records()
            .into_iter()
            .filter(|r| r.id != exclude_id && filter.matches(r))
            .take(limit)
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_reads()
    }
}

pub const STUB_IMAGES: [&str; 3] = [
    "https://images.pexels.com/photos/1/large.jpeg",
    "https://images.pexels.com/photos/2/large.jpeg",
    "https://images.pexels.com/photos/3/large.jpeg",
];

pub fn itinerary_json(interests: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "name": "Five Quiet Days in Japan",
        "description": "Temples, gardens and slow evenings in Kyoto and Nara.",
        "estimatedPrice": "$1800",
        "duration": 5,
        "budget": "midrange",
        "travelStyle": "relaxed",
        "country": "Japan",
        "interests": interests,
        "groupType": "solo",
        "images": [],
        "bestTimeToVisit": [
            "🌸 Spring (March to May): cherry blossoms",
            "☀️ Summer (June to August): festivals",
            "🍁 Autumn (September to November): foliage",
            "❄️ Winter (December to February): snow and onsen"
        ],
        "weatherInfo": [
            "☀️ Summer: 25-35°C (77-95°F)",
            "🌦️ Spring: 10-20°C (50-68°F)",
            "🌧️ Rainy season: 20-28°C (68-82°F)",
            "❄️ Winter: 0-10°C (32-50°F)"
        ],
        "location": {
            "city": "Kyoto",
            "coordinates": [35.0116, 135.7681],
            "openStreetMap": "https://www.openstreetmap.org/#map=12/35.0116/135.7681"
        },
        "itinerary": [
            {
                "day": 1,
                "location": "Kyoto",
                "activities": [
                    {"time": "Morning", "description": "⛩️ Walk the gates of Fushimi Inari"},
                    {"time": "Afternoon", "description": "🍵 Tea ceremony in Gion"},
                    {"time": "Evening", "description": "🍜 Dinner in Pontocho alley"}
                ]
            }
        ]
    })
}

/// Model output the way Gemini tends to return it: fenced and labeled.
pub fn fenced_itinerary() -> String {
    format!("```json\n{}\n```", itinerary_json(serde_json::json!("culture")))
}

pub fn japan_body() -> serde_json::Value {
    serde_json::json!({
        "country": "Japan",
        "numberOfDays": 5,
        "budget": "midrange",
        "interests": "culture",
        "travelStyle": "relaxed",
        "groupType": "solo",
        "userId": "u1"
    })
}

pub fn fast_config() -> ItineraryGenerationConfig {
    ItineraryGenerationConfig {
        retry: RetryPolicy::new(3, Duration::from_millis(1)),
        ..ItineraryGenerationConfig::default()
    }
}

pub fn stored_trip(
    budget: &str,
    travel_style: &str,
    group_type: &str,
    age_minutes: i64,
) -> StoredItinerary {
    let generated: GeneratedItinerary =
        serde_json::from_value(itinerary_json(serde_json::json!(["culture"]))).unwrap();
    let mut record =
        ItineraryDocument::from_generated(&generated, "u1").into_stored(ObjectId::new());
    record.budget = budget.to_string();
    record.travel_style = travel_style.to_string();
    record.group_type = group_type.to_string();
    record.created_at = Utc::now() - ChronoDuration::minutes(age_minutes);
    record
}

pub struct TestApp {
    pub model: Arc<FakeModel>,
    pub images: Arc<FakeImages>,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new(model: Arc<FakeModel>) -> Self {
        Self {
            model,
            images: FakeImages::returning(&STUB_IMAGES),
            store: InMemoryStore::new(),
        }
    }

    pub fn generator(&self) -> ItineraryGenerator {
        ItineraryGenerator::with_config(
            self.model.clone(),
            self.images.clone(),
            self.store.clone(),
            fast_config(),
        )
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = AppState {
            generator: Arc::new(self.generator()),
            store: self.store.clone(),
        };

        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::config)
    }
}
