use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::request::ItineraryRequest;
use crate::routes::AppState;

pub const GENERATION_FAILED: &str = "Failed to generate itinerary";

/*
    /generate-itinerary
*/
pub async fn generate(
    state: web::Data<AppState>,
    input: web::Json<ItineraryRequest>,
) -> impl Responder {
    let request = input.into_inner();
    log::info!(
        "Generating {:?}-day itinerary for {}",
        request.number_of_days,
        request.country
    );

    match state.generator.generate(&request).await {
        Ok(itinerary) => HttpResponse::Ok().json(json!({ "itinerary": itinerary })),
        Err(err) => HttpResponse::InternalServerError().json(json!({
            "error": GENERATION_FAILED,
            "details": err.to_string(),
        })),
    }
}
