use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Hotel, Itinerary};

// Wire envelopes for the planner backend. Entity shapes live in the domain.

// Request payload for itinerary generation.
#[derive(Debug, Serialize)]
pub struct PlanTripRequest<'a> {
    pub city: &'a str,
    pub interests: &'a [String],
    pub days: u32,
}

// Response payload for a saved itinerary.
#[derive(Debug, Deserialize)]
pub struct SaveItineraryResponse {
    #[serde(rename = "itineraryId", alias = "id")]
    pub itinerary_id: Option<String>,
}

// Response payload for the itinerary listing.
#[derive(Debug, Deserialize)]
pub struct ListItinerariesResponse {
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

// Request payload for hotel search.
#[derive(Debug, Serialize)]
pub struct FindHotelsRequest<'a> {
    pub city: &'a str,
}

// Response payload for hotel search; `success` is absent on validation errors.
#[derive(Debug, Deserialize)]
pub struct FindHotelsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    pub error: Option<String>,
}

// Hotel fields merged with the stay being booked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails<'a> {
    #[serde(flatten)]
    pub hotel: &'a Hotel,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

// Request payload for booking; the token travels in the body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHotelRequest<'a> {
    pub token: &'a str,
    pub booking_details: BookingDetails<'a>,
}

// Response payload for booking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHotelResponse {
    #[serde(default)]
    pub success: bool,
    pub booking_id: Option<String>,
    pub error: Option<String>,
}

// Request payload for registering a provider account with the backend.
#[derive(Debug, Serialize)]
pub struct SaveUserRequest<'a> {
    pub token: &'a str,
    pub email: &'a str,
    pub uid: &'a str,
}

// Error envelope used by the backend on failure statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}
