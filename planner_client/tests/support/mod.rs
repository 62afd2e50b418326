// In-process fakes of the planner backend and the identity provider.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
};
use serde_json::{Value, json};

pub const GOOD_TOKEN: &str = "good-token";
pub const API_KEY: &str = "test-key";

// What the fake saw, for assertions.
#[derive(Default)]
pub struct Recorded {
    pub bodies: HashMap<&'static str, Value>,
    pub deleted: Vec<String>,
}

pub type Shared = Arc<Mutex<Recorded>>;

// Bind to an ephemeral port and serve on the test runtime; returns the base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    format!("http://{addr}")
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {GOOD_TOKEN}"))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "error": "Invalid token", "code": "AUTH_FAILED" })),
    )
}

fn record(state: &Shared, key: &'static str, body: &Value) {
    state
        .lock()
        .expect("recorded lock")
        .bodies
        .insert(key, body.clone());
}

pub fn backend(state: Shared) -> Router {
    Router::new()
        .route("/plan-trip", post(plan_trip))
        .route("/save-itinerary", post(save_itinerary))
        .route("/get-itineraries", get(get_itineraries))
        .route("/delete-itinerary/{id}", delete(delete_itinerary))
        .route("/find-hotels", post(find_hotels))
        .route("/book-hotel", post(book_hotel))
        .route("/save-user", post(save_user))
        .with_state(state)
}

async fn plan_trip(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, "plan-trip", &body);
    let city = body["city"].as_str().unwrap_or_default().to_string();
    if city == "Atlantis" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to generate itinerary" })),
        );
    }
    let days = body["days"].as_u64().unwrap_or(1);
    let itinerary: Vec<String> = (1..=days)
        .map(|day| format!("Day {day}: explore {city}"))
        .collect();
    (
        StatusCode::OK,
        Json(json!({
            "itinerary": itinerary.join("\n"),
            "recommendations": "Book museums ahead",
            "weather": { "temp": 18 },
        })),
    )
}

async fn save_itinerary(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    record(&state, "save-itinerary", &body);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "itineraryId": "doc-1" })),
    )
}

async fn get_itineraries(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "itineraries": [
                {
                    "id": "doc-1",
                    "title": "Paris Adventure",
                    "city": "Paris",
                    "days": "3",
                    "created_at": "2025-03-01T10:00:00Z",
                    "interests": ["food", "art"],
                    "itinerary": "Day 1: Louvre",
                    "recommendations": "Try the bakeries",
                },
                { "id": 42, "city": "Rome", "days": 2 }
            ]
        })),
    )
}

async fn delete_itinerary(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Itinerary not found" })),
        );
    }
    state.lock().expect("recorded lock").deleted.push(id);
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn find_hotels(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let city = body["city"].as_str().unwrap_or_default();
    if city.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "City is required" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "hotels": [
                {
                    "id": 1,
                    "name": format!("{city} Grand"),
                    "price": 250,
                    "rating": 4.7,
                    "address": "1 Main Street",
                    "amenities": ["Spa", "Pool"],
                    "description": "Central and quiet.",
                    "image": "Luxury",
                }
            ]
        })),
    )
}

async fn book_hotel(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, "book-hotel", &body);
    if body["token"] != GOOD_TOKEN {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid token" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "bookingId": "bk-7" })),
    )
}

async fn save_user(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, "save-user", &body);
    if body["token"] != GOOD_TOKEN {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

// Identity Toolkit fake; one account, password "secret123".
pub fn identity() -> Router {
    Router::new()
        .route("/v1/{method}", post(identity_call))
}

fn provider_error(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "code": 400, "message": message } })),
    )
}

async fn identity_call(
    Path(method): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if query.get("key").map(String::as_str) != Some(API_KEY) {
        return provider_error("API key not valid. Please pass a valid API key.");
    }

    match method.as_str() {
        "accounts:signInWithPassword" => {
            if body["email"] != "ana@example.com" || body["password"] != "secret123" {
                return provider_error("INVALID_LOGIN_CREDENTIALS");
            }
            (
                StatusCode::OK,
                Json(json!({
                    "localId": "uid-ana",
                    "email": "ana@example.com",
                    "idToken": "ignored",
                    "refreshToken": "refresh-ana",
                    "registered": true,
                })),
            )
        }
        "accounts:signUp" => {
            if body["email"] == "ana@example.com" {
                return provider_error("EMAIL_EXISTS");
            }
            (
                StatusCode::OK,
                Json(json!({
                    "localId": "uid-new",
                    "email": body["email"],
                    "idToken": "ignored",
                    "refreshToken": "refresh-new",
                })),
            )
        }
        "token" => {
            if body["grant_type"] != "refresh_token" || body["refresh_token"] != "refresh-ana" {
                return provider_error("INVALID_REFRESH_TOKEN");
            }
            (
                StatusCode::OK,
                Json(json!({
                    "id_token": GOOD_TOKEN,
                    "refresh_token": "refresh-ana",
                    "expires_in": "3600",
                })),
            )
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}
