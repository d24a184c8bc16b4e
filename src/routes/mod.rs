use actix_web::{error::InternalError, web, HttpResponse};
use std::sync::Arc;

use crate::services::itinerary_generation_service::ItineraryGenerator;
use crate::services::itinerary_store::ItineraryStore;

pub mod generate_itinerary;
pub mod health;
pub mod itinerary;

/// Shared handler state. Everything in here is safe to use from concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ItineraryGenerator>,
    pub store: Arc<dyn ItineraryStore>,
}

/// Unreadable generation bodies get the same error shape as pipeline failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let details = err.to_string();
        log::warn!("Rejected generation body: {}", details);
        let response = HttpResponse::InternalServerError().json(serde_json::json!({
            "error": generate_itinerary::GENERATION_FAILED,
            "details": details,
        }));
        InternalError::from_response(err, response).into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/generate-itinerary")
                .app_data(json_config())
                .route(web::post().to(generate_itinerary::generate)),
        )
        .service(
            web::scope("/itineraries")
                .route("", web::get().to(itinerary::get_all))
                .route("/{id}", web::get().to(itinerary::get_by_id))
                .route("/{id}/related", web::get().to(itinerary::get_related)),
        );
}
