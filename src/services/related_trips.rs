use std::collections::HashSet;

use crate::error::StoreError;
use crate::models::stored::{StoredItinerary, TraitFilter};
use crate::services::itinerary_store::ItineraryStore;

pub const MAX_RELATED_TRIPS: usize = 3;

/// Concatenates result sets in order, keeping the first copy of each id.
pub fn merge_unique(groups: Vec<Vec<StoredItinerary>>, limit: usize) -> Vec<StoredItinerary> {
    let mut seen = HashSet::new();
    groups
        .into_iter()
        .flatten()
        .filter(|trip| seen.insert(trip.id.clone()))
        .take(limit)
        .collect()
}

/// Trips sharing at least two of budget, travel style and group type with `trip`.
/// Each query is capped at `MAX_RELATED_TRIPS`.
pub async fn find_related(
    store: &dyn ItineraryStore,
    trip: &StoredItinerary,
) -> Result<Vec<StoredItinerary>, StoreError> {
    let budget_and_style = TraitFilter {
        budget: Some(trip.budget.clone()),
        travel_style: Some(trip.travel_style.clone()),
        group_type: None,
    };
    let budget_and_group = TraitFilter {
        budget: Some(trip.budget.clone()),
        travel_style: None,
        group_type: Some(trip.group_type.clone()),
    };
    let style_and_group = TraitFilter {
        budget: None,
        travel_style: Some(trip.travel_style.clone()),
        group_type: Some(trip.group_type.clone()),
    };

    let (first, second, third) = futures::try_join!(
        store.find_matching(&budget_and_style, &trip.id, MAX_RELATED_TRIPS),
        store.find_matching(&budget_and_group, &trip.id, MAX_RELATED_TRIPS),
        store.find_matching(&style_and_group, &trip.id, MAX_RELATED_TRIPS),
    )?;

    Ok(merge_unique(vec![first, second, third], MAX_RELATED_TRIPS))
}
