use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    BookingRequest, ClientError, Hotel, IdentityProvider, Itinerary, NewItinerary,
    PlannerBackend, Session, TripPlan, TripRequest,
};
use crate::use_cases::api::ApiClient;
use crate::use_cases::session::SessionStore;

// Builds the shared context the views receive, wired to fakes.
pub(crate) fn context(
    identity: Arc<FakeIdentity>,
    backend: Arc<RecordingBackend>,
) -> (Arc<SessionStore>, ApiClient) {
    let api = ApiClient::new(backend);
    let session = Arc::new(SessionStore::new(identity, api.clone()));
    (session, api)
}

pub(crate) fn sample_hotel(id: &str) -> Hotel {
    Hotel {
        id: id.to_string(),
        name: format!("Hotel {id}"),
        price: 180.0,
        rating: 4.6,
        address: "1 Harbour Street".to_string(),
        amenities: vec!["Pool".to_string(), "WiFi".to_string()],
        description: "Quiet rooms near the old town.".to_string(),
        image: Some("boutique".to_string()),
    }
}

pub(crate) fn sample_itinerary(id: &str, city: &str) -> Itinerary {
    Itinerary {
        id: id.to_string(),
        title: format!("Trip to {city}"),
        city: city.to_string(),
        days: 2,
        created_at: Some("2025-03-01".to_string()),
        interests: Some(vec!["food".to_string()]),
        itinerary: "Day 1: walk\nDay 2: eat".to_string(),
        recommendations: None,
        weather: None,
        budget: None,
    }
}

// Identity provider fake with an in-memory account table.
pub(crate) struct FakeIdentity {
    accounts: Mutex<HashMap<String, String>>,
    token_calls: AtomicUsize,
    fail_create: bool,
    reject_tokens: bool,
}

impl FakeIdentity {
    pub(crate) fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            token_calls: AtomicUsize::new(0),
            fail_create: false,
            reject_tokens: false,
        }
    }

    pub(crate) fn with_account(self, email: &str, password: &str) -> Self {
        self.accounts
            .lock()
            .expect("accounts mutex poisoned")
            .insert(email.to_string(), password.to_string());
        self
    }

    pub(crate) fn failing_signup(mut self) -> Self {
        self.fail_create = true;
        self
    }

    // Refresh is refused as it is for an expired or disabled account.
    pub(crate) fn rejecting_tokens(mut self) -> Self {
        self.reject_tokens = true;
        self
    }

    pub(crate) fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn has_account(&self, email: &str) -> bool {
        self.accounts
            .lock()
            .expect("accounts mutex poisoned")
            .contains_key(email)
    }
}

fn session_for(email: &str) -> Session {
    Session {
        uid: format!("uid-{email}"),
        email: email.to_string(),
        refresh_token: format!("refresh-{email}"),
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let guard = self.accounts.lock().expect("accounts mutex poisoned");
        match guard.get(email) {
            Some(stored) if stored == password => Ok(session_for(email)),
            _ => Err(ClientError::Auth("INVALID_LOGIN_CREDENTIALS".to_string())),
        }
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        if self.fail_create {
            return Err(ClientError::Auth("WEAK_PASSWORD".to_string()));
        }

        let mut guard = self.accounts.lock().expect("accounts mutex poisoned");
        if guard.contains_key(email) {
            return Err(ClientError::Auth("EMAIL_EXISTS".to_string()));
        }
        guard.insert(email.to_string(), password.to_string());
        Ok(session_for(email))
    }

    async fn id_token(&self, session: &Session) -> Result<String, ClientError> {
        let call = self.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.reject_tokens {
            return Err(ClientError::Auth("TOKEN_EXPIRED".to_string()));
        }
        Ok(format!("id-token-{}-{call}", session.uid))
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub plan_trip: bool,
    pub save_itinerary: bool,
    pub list_itineraries: bool,
    pub delete_itinerary: bool,
    pub find_hotels: bool,
    pub book_hotel: bool,
    pub register_user: bool,
}

fn unreachable_backend() -> ClientError {
    ClientError::Network("connection refused".to_string())
}

fn refused(status: u16, message: &str) -> ClientError {
    ClientError::Backend {
        status,
        message: Some(message.to_string()),
    }
}

// Backend fake that records every call it receives.
pub(crate) struct RecordingBackend {
    calls: Mutex<Vec<&'static str>>,
    tokens: Mutex<Vec<String>>,
    itineraries: Mutex<Vec<Itinerary>>,
    saved: Mutex<Vec<NewItinerary>>,
    bookings: Mutex<Vec<BookingRequest>>,
    hotels: Vec<Hotel>,
    hotel_error: Option<String>,
    unreadable_hotels: bool,
    booking_error: Option<String>,
    failures: FailureFlags,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
            itineraries: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
            bookings: Mutex::new(Vec::new()),
            hotels: vec![sample_hotel("h1"), sample_hotel("h2")],
            hotel_error: None,
            unreadable_hotels: false,
            booking_error: None,
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn with_itineraries(self, itineraries: Vec<Itinerary>) -> Self {
        *self.itineraries.lock().expect("itineraries mutex poisoned") = itineraries;
        self
    }

    pub(crate) fn with_hotel_error(mut self, message: &str) -> Self {
        self.hotel_error = Some(message.to_string());
        self
    }

    pub(crate) fn with_unreadable_hotels(mut self) -> Self {
        self.unreadable_hotels = true;
        self
    }

    pub(crate) fn with_booking_error(mut self, message: &str) -> Self {
        self.booking_error = Some(message.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(crate) fn tokens(&self) -> Vec<String> {
        self.tokens.lock().expect("tokens mutex poisoned").clone()
    }

    pub(crate) fn saved(&self) -> Vec<NewItinerary> {
        self.saved.lock().expect("saved mutex poisoned").clone()
    }

    pub(crate) fn bookings(&self) -> Vec<BookingRequest> {
        self.bookings.lock().expect("bookings mutex poisoned").clone()
    }

    fn record(&self, call: &'static str, token: Option<&str>) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
        if let Some(token) = token {
            self.tokens
                .lock()
                .expect("tokens mutex poisoned")
                .push(token.to_string());
        }
    }
}

#[async_trait]
impl PlannerBackend for RecordingBackend {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, ClientError> {
        self.record("plan_trip", None);
        if self.failures.plan_trip {
            return Err(unreachable_backend());
        }

        let itinerary = (1..=request.days)
            .map(|day| format!("Day {day}: explore {}", request.city))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(TripPlan {
            itinerary,
            recommendations: format!("Try the {}", request.interests.join(" and ")),
            weather: None,
            budget: None,
        })
    }

    async fn save_itinerary(
        &self,
        token: &str,
        itinerary: &NewItinerary,
    ) -> Result<String, ClientError> {
        self.record("save_itinerary", Some(token));
        if self.failures.save_itinerary {
            return Err(refused(500, "save failed"));
        }

        let mut saved = self.saved.lock().expect("saved mutex poisoned");
        saved.push(itinerary.clone());
        Ok(format!("saved-{}", saved.len()))
    }

    async fn list_itineraries(&self, token: &str) -> Result<Vec<Itinerary>, ClientError> {
        self.record("list_itineraries", Some(token));
        if self.failures.list_itineraries {
            return Err(unreachable_backend());
        }

        Ok(self
            .itineraries
            .lock()
            .expect("itineraries mutex poisoned")
            .clone())
    }

    async fn delete_itinerary(&self, token: &str, id: &str) -> Result<(), ClientError> {
        self.record("delete_itinerary", Some(token));
        if self.failures.delete_itinerary {
            return Err(refused(500, "delete failed"));
        }

        self.itineraries
            .lock()
            .expect("itineraries mutex poisoned")
            .retain(|itinerary| itinerary.id != id);
        Ok(())
    }

    async fn find_hotels(&self, _city: &str) -> Result<Vec<Hotel>, ClientError> {
        self.record("find_hotels", None);
        if self.failures.find_hotels {
            return Err(unreachable_backend());
        }
        if let Some(message) = &self.hotel_error {
            return Err(refused(500, message));
        }
        if self.unreadable_hotels {
            return Err(ClientError::Decode("expected a list of hotels".to_string()));
        }

        Ok(self.hotels.clone())
    }

    async fn book_hotel(
        &self,
        token: &str,
        booking: &BookingRequest,
    ) -> Result<String, ClientError> {
        self.record("book_hotel", Some(token));
        if self.failures.book_hotel {
            return Err(unreachable_backend());
        }
        if let Some(message) = &self.booking_error {
            return Err(refused(500, message));
        }

        let mut bookings = self.bookings.lock().expect("bookings mutex poisoned");
        bookings.push(booking.clone());
        Ok(format!("booking-{}", bookings.len()))
    }

    async fn register_user(&self, token: &str, _email: &str, _uid: &str) -> Result<(), ClientError> {
        self.record("register_user", Some(token));
        if self.failures.register_user {
            return Err(refused(400, "invalid token"));
        }
        Ok(())
    }
}
