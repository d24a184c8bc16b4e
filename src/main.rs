use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_planner_api::config::AppConfig;
use trip_planner_api::db;
use trip_planner_api::routes::{self, AppState};
use trip_planner_api::services::gemini_service::GeminiClient;
use trip_planner_api::services::image_service::PexelsImageService;
use trip_planner_api::services::itinerary_generation_service::ItineraryGenerator;
use trip_planner_api::services::itinerary_store::{ItineraryStore, MongoItineraryStore};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let client = db::mongo::create_mongo_client(&config.mongo_uri)
        .await
        .map_err(|e| startup_error("Failed to create MongoDB client", e))?;
    db::mongo::verify_connection(&client, &config.mongo_database).await;

    let model = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_timeout,
    )
    .map_err(|e| startup_error("Failed to build Gemini client", e))?
    .with_base_url(config.gemini_base_url.clone());

    if config.pexels_api_key.is_empty() {
        log::warn!("PEXELS_API_KEY is not set, itineraries will use placeholder images");
    }
    let images = PexelsImageService::new(config.pexels_api_key.clone(), config.pexels_timeout)
        .map_err(|e| startup_error("Failed to build Pexels client", e))?
        .with_base_url(config.pexels_base_url.clone());

    let store: Arc<dyn ItineraryStore> =
        Arc::new(MongoItineraryStore::new(client, config.mongo_database.clone()));

    let generator = ItineraryGenerator::with_config(
        Arc::new(model),
        Arc::new(images),
        store.clone(),
        config.generation_config(),
    );
    let state = AppState {
        generator: Arc::new(generator),
        store,
    };

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::config)
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
