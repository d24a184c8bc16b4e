pub mod gemini_service;
pub mod image_service;
pub mod itinerary_generation_service;
pub mod itinerary_store;
pub mod prompt_builder;
pub mod related_trips;
pub mod response_parser;
pub mod retry_policy;
