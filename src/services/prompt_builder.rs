use crate::models::request::ValidatedRequest;

/// Renders the itinerary prompt. Interpolation only, so equal requests give equal prompts.
pub fn build_prompt(request: &ValidatedRequest) -> String {
    let days = request.number_of_days;
    let country = &request.country;
    let budget = &request.budget;
    let interests = request.interests.to_string();
    let travel_style = &request.travel_style;
    let group_type = &request.group_type;

    format!(
        r#"Generate a {days}-day travel itinerary for {country} based on the following user information:
  Budget: '{budget}'
  Interests: '{interests}'
  TravelStyle: '{travel_style}'
  GroupType: '{group_type}'
  Return ONLY a valid JSON object in the following structure, without any markdown formatting or additional text:
  {{
    "name": "A descriptive title for the trip",
    "description": "A brief description of the trip and its highlights not exceeding 100 words",
    "estimatedPrice": "Lowest average price for the trip in USD, e.g.$price",
    "duration": {days},
    "budget": "{budget}",
    "travelStyle": "{travel_style}",
    "country": "{country}",
    "interests": "{interests}",
    "groupType": "{group_type}",
    "images": [],
    "bestTimeToVisit": [
      "🌸 Season (from month to month): reason to visit",
      "☀️ Season (from month to month): reason to visit",
      "🍁 Season (from month to month): reason to visit",
      "❄️ Season (from month to month): reason to visit"
    ],
    "weatherInfo": [
      "☀️ Season: temperature range in Celsius (temperature range in Fahrenheit)",
      "🌦️ Season: temperature range in Celsius (temperature range in Fahrenheit)",
      "🌧️ Season: temperature range in Celsius (temperature range in Fahrenheit)",
      "❄️ Season: temperature range in Celsius (temperature range in Fahrenheit)"
    ],
    "location": {{
      "city": "name of the city or region",
      "coordinates": [latitude, longitude],
      "openStreetMap": "link to open street map"
    }},
    "itinerary": [
      {{
        "day": 1,
        "location": "City/Region Name",
        "activities": [
          {{"time": "Morning", "description": "🏰 Visit the local historic castle and enjoy a scenic walk"}},
          {{"time": "Afternoon", "description": "🖼️ Explore a famous art museum with a guided tour"}},
          {{"time": "Evening", "description": "🍷 Dine at a rooftop restaurant with local wine"}}
        ]
      }}
    ]
  }}"#
    )
}
