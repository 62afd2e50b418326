use std::sync::Arc;

use crate::domain::{
    BookingRequest, ClientError, Hotel, Itinerary, NewItinerary, PlannerBackend, TripPlan,
    TripRequest,
};

/// Result shape for operations that report failure as a message instead of
/// raising: the caller always gets something it can render.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

/// Typed wrapper over the backend port, one method per capability.
///
/// Signalling differs per operation:
/// - `generate_itinerary` never fails, it degrades to a placeholder plan;
/// - `find_hotels` and `book_hotel` return an [`Outcome`];
/// - everything else returns `Result` and the caller decides what to show.
#[derive(Clone)]
pub struct ApiClient {
    backend: Arc<dyn PlannerBackend>,
}

impl ApiClient {
    pub fn new(backend: Arc<dyn PlannerBackend>) -> Self {
        Self { backend }
    }

    #[tracing::instrument(name = "generate_itinerary", skip_all, fields(city = %request.city, days = request.days))]
    pub async fn generate_itinerary(&self, request: &TripRequest) -> TripPlan {
        match self.backend.plan_trip(request).await {
            Ok(plan) => plan,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch itinerary.");
                TripPlan::unavailable()
            }
        }
    }

    #[tracing::instrument(name = "save_itinerary", skip_all, fields(city = %itinerary.city))]
    pub async fn save_itinerary(
        &self,
        token: &str,
        itinerary: &NewItinerary,
    ) -> Result<String, ClientError> {
        let id = self
            .backend
            .save_itinerary(token, itinerary)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to save itinerary."))?;

        tracing::info!(itinerary_id = %id, "itinerary saved.");
        Ok(id)
    }

    #[tracing::instrument(name = "list_itineraries", skip_all)]
    pub async fn list_itineraries(&self, token: &str) -> Result<Vec<Itinerary>, ClientError> {
        self.backend
            .list_itineraries(token)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to fetch itineraries."))
    }

    #[tracing::instrument(name = "delete_itinerary", skip_all, fields(itinerary_id = %id))]
    pub async fn delete_itinerary(&self, token: &str, id: &str) -> Result<(), ClientError> {
        self.backend
            .delete_itinerary(token, id)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to delete itinerary."))
    }

    #[tracing::instrument(name = "find_hotels", skip_all, fields(city = %city))]
    pub async fn find_hotels(&self, city: &str) -> Outcome<Vec<Hotel>> {
        match self.backend.find_hotels(city).await {
            Ok(hotels) => Outcome::Success(hotels),
            Err(err) => {
                tracing::warn!(error = %err, "hotel search failed.");
                Outcome::Failure(match err {
                    ClientError::Backend {
                        message: Some(message),
                        ..
                    } => message,
                    ClientError::Network(_) | ClientError::Decode(_) => {
                        "Failed to connect to server".to_string()
                    }
                    _ => "Failed to find hotels".to_string(),
                })
            }
        }
    }

    #[tracing::instrument(name = "book_hotel", skip_all, fields(hotel_id = %booking.hotel.id))]
    pub async fn book_hotel(&self, token: &str, booking: &BookingRequest) -> Outcome<String> {
        match self.backend.book_hotel(token, booking).await {
            Ok(booking_id) => {
                tracing::info!(booking_id = %booking_id, "hotel booked.");
                Outcome::Success(booking_id)
            }
            Err(ClientError::Backend { message, .. }) => {
                let reason = message.unwrap_or_else(|| "unknown error".to_string());
                tracing::warn!(error = %reason, "booking refused.");
                Outcome::Failure(format!("Booking failed: {reason}"))
            }
            Err(err) => {
                tracing::error!(error = %err, "booking request failed.");
                Outcome::Failure("Failed to process booking".to_string())
            }
        }
    }

    #[tracing::instrument(name = "register_user", skip_all, fields(uid = %uid))]
    pub async fn register_user(&self, token: &str, email: &str, uid: &str) -> Result<(), ClientError> {
        self.backend
            .register_user(token, email, uid)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to register user."))
    }
}
