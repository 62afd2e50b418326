use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::errors::ClientError;

// Longest trip the planner form accepts.
pub const MAX_TRIP_DAYS: u32 = 14;

// Text shown in place of an itinerary when generation fails.
pub const UNAVAILABLE_ITINERARY: &str = "Error fetching itinerary";

// Signed-in identity issued by the identity provider.
// The refresh token is the opaque credential used to mint bearer tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub refresh_token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

// Validated input for itinerary generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub city: String,
    pub interests: Vec<String>,
    pub days: u32,
}

impl TripRequest {
    // Builds a request from raw form input; interests are comma separated.
    pub fn new(city: &str, interests: &str, days: u32) -> Result<Self, ClientError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ClientError::InvalidInput("City is required"));
        }

        let interests = split_interests(interests);
        if interests.is_empty() {
            return Err(ClientError::InvalidInput("At least one interest is required"));
        }

        if !(1..=MAX_TRIP_DAYS).contains(&days) {
            return Err(ClientError::InvalidInput("Days must be between 1 and 14"));
        }

        Ok(Self {
            city: city.to_string(),
            interests,
            days,
        })
    }
}

pub fn split_interests(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|interest| !interest.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default, deserialize_with = "lenient_number")]
    pub flights: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub accommodation: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub food: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: f64,
}

// Generated plan returned by the backend; not yet persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripPlan {
    pub itinerary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: String,
    #[serde(default)]
    pub weather: Option<Value>,
    #[serde(default)]
    pub budget: Option<Budget>,
}

impl TripPlan {
    pub fn unavailable() -> Self {
        Self {
            itinerary: UNAVAILABLE_ITINERARY.to_string(),
            recommendations: String::new(),
            weather: None,
            budget: None,
        }
    }
}

// Saved itinerary as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default = "untitled", deserialize_with = "title_or_untitled")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default = "one_day", deserialize_with = "days_from_number_or_text")]
    pub days: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub itinerary: String,
    #[serde(default)]
    pub recommendations: Option<String>,
    #[serde(default)]
    pub weather: Option<Value>,
    #[serde(default)]
    pub budget: Option<Budget>,
}

// Fields sent when saving a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItinerary {
    pub city: String,
    pub days: u32,
    pub interests: Vec<String>,
    pub itinerary: String,
    pub recommendations: String,
    pub weather: Option<Value>,
    pub budget: Option<Budget>,
}

// Transient hotel search form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelSearchQuery {
    pub city: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: u32,
}

impl Default for HotelSearchQuery {
    fn default() -> Self {
        Self {
            city: String::new(),
            check_in: None,
            check_out: None,
            guests: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    // Image category keyword such as "luxury" or "boutique".
    #[serde(default)]
    pub image: Option<String>,
}

// A hotel plus the stay being booked.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub hotel: Hotel,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

fn untitled() -> String {
    "Untitled Trip".to_string()
}

fn one_day() -> u32 {
    1
}

// Stored documents pass explicit nulls through; treat them as absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn title_or_untitled<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(untitled))
}

// Generated hotel and budget figures arrive as numbers, numeric text
// ("150", "$150") or null.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Figure {
        Number(f64),
        Text(String),
    }

    match Option::<Figure>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Figure::Number(value)) => Ok(value),
        Some(Figure::Text(text)) => text
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .map_err(serde::de::Error::custom),
    }
}

// Older saves stored the day count as form text ("3").
fn days_from_number_or_text<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Days {
        Number(u32),
        Text(String),
    }

    match Option::<Days>::deserialize(deserializer)? {
        None => Ok(one_day()),
        Some(Days::Number(days)) => Ok(days),
        Some(Days::Text(text)) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
