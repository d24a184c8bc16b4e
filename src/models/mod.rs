pub mod itinerary;
pub mod request;
pub mod stored;
