use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOptions,
    Client, Collection,
};
use std::sync::Arc;

use crate::error::StoreError;
use crate::models::itinerary::GeneratedItinerary;
use crate::models::stored::{ItineraryDocument, StoredItinerary, TraitFilter};

pub const ITINERARY_COLLECTION: &str = "itineraries";

/// Persistence seam for itineraries. Writes happen once per generated trip.
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    async fn save(
        &self,
        itinerary: &GeneratedItinerary,
        user_id: &str,
    ) -> Result<StoredItinerary, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredItinerary>, StoreError>;

    /// Newest first. `page` is 1-based. Returns the page and the total count.
    async fn list(&self, page: u64, per_page: u64)
        -> Result<(Vec<StoredItinerary>, u64), StoreError>;

    /// At most `limit` trips matching every trait set in `filter`.
    async fn find_matching(
        &self,
        filter: &TraitFilter,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredItinerary>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub struct MongoItineraryStore {
    client: Arc<Client>,
    database: String,
}

impl MongoItineraryStore {
    pub fn new(client: Arc<Client>, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    fn collection(&self) -> Collection<ItineraryDocument> {
        self.client
            .database(&self.database)
            .collection(ITINERARY_COLLECTION)
    }
}

fn stored(document: ItineraryDocument) -> Option<StoredItinerary> {
    let id = document.id?;
    Some(document.into_stored(id))
}

fn trait_query(filter: &TraitFilter, exclude: Option<ObjectId>) -> Document {
    let mut query = Document::new();
    if let Some(budget) = &filter.budget {
        query.insert("budget", budget.as_str());
    }
    if let Some(style) = &filter.travel_style {
        query.insert("travel_style", style.as_str());
    }
    if let Some(group) = &filter.group_type {
        query.insert("group_type", group.as_str());
    }
    if let Some(id) = exclude {
        query.insert("_id", doc! { "$ne": id });
    }
    query
}

fn matching_options(limit: usize) -> FindOptions {
    FindOptions::builder().limit(limit as i64).build()
}

#[async_trait]
impl ItineraryStore for MongoItineraryStore {
    async fn save(
        &self,
        itinerary: &GeneratedItinerary,
        user_id: &str,
    ) -> Result<StoredItinerary, StoreError> {
        let document = ItineraryDocument::from_generated(itinerary, user_id);

        let result = self.collection().insert_one(&document).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError("store returned a non-ObjectId id".to_string()))?;

        Ok(document.into_stored(id))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredItinerary>, StoreError> {
        let id = match ObjectId::parse_str(id) {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };

        let found = self.collection().find_one(doc! { "_id": id }).await?;
        Ok(found.and_then(stored))
    }

    async fn list(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<StoredItinerary>, u64), StoreError> {
        let collection = self.collection();
        let total = collection.count_documents(doc! {}).await?;

        let skip = page.saturating_sub(1).saturating_mul(per_page);
        let cursor = collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(per_page as i64)
            .await?;
        let documents: Vec<ItineraryDocument> = cursor.try_collect().await?;

        Ok((documents.into_iter().filter_map(stored).collect(), total))
    }

    async fn find_matching(
        &self,
        filter: &TraitFilter,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredItinerary>, StoreError> {
        let exclude = ObjectId::parse_str(exclude_id).ok();
        let cursor = self
            .collection()
            .find(trait_query(filter, exclude))
            .with_options(matching_options(limit))
            .await?;
        let documents: Vec<ItineraryDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().filter_map(stored).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
