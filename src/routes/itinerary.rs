use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::models::stored::ItineraryPage;
use crate::routes::AppState;
use crate::services::related_trips::find_related;

const DEFAULT_PER_PAGE: u64 = 10;
const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ListQuery {
    fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    fn per_page(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }
}

/*
    /itineraries?page=&limit=
*/
pub async fn get_all(state: web::Data<AppState>, query: web::Query<ListQuery>) -> impl Responder {
    let page = query.page();
    let per_page = query.per_page();

    match state.store.list(page, per_page).await {
        Ok((itineraries, total)) => HttpResponse::Ok().json(ItineraryPage {
            itineraries,
            page,
            per_page,
            total,
        }),
        Err(err) => {
            log::error!("Failed to retrieve itineraries: {}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to retrieve itineraries",
                "details": err.to_string(),
            }))
        }
    }
}

/*
    /itineraries/{id}
*/
pub async fn get_by_id(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let id = path.into_inner();

    match state.store.find_by_id(&id).await {
        Ok(Some(itinerary)) => HttpResponse::Ok().json(itinerary),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Itinerary not found" })),
        Err(err) => {
            log::error!("Failed to retrieve itinerary {}: {}", id, err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to retrieve itinerary",
                "details": err.to_string(),
            }))
        }
    }
}

/*
    /itineraries/{id}/related
*/
pub async fn get_related(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let id = path.into_inner();

    let trip = match state.store.find_by_id(&id).await {
        Ok(Some(trip)) => trip,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "error": "Itinerary not found" }))
        }
        Err(err) => {
            log::error!("Failed to retrieve itinerary {}: {}", id, err);
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to retrieve itinerary",
                "details": err.to_string(),
            }));
        }
    };

    match find_related(state.store.as_ref(), &trip).await {
        Ok(related) => HttpResponse::Ok().json(related),
        Err(err) => {
            log::error!("Failed to load related trips for {}: {}", id, err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to retrieve related trips",
                "details": err.to_string(),
            }))
        }
    }
}
