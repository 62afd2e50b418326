use async_trait::async_trait;

use crate::domain::entities::{
    BookingRequest, Hotel, Itinerary, NewItinerary, Session, TripPlan, TripRequest,
};
use crate::domain::errors::ClientError;

// Port for the external email/password identity provider.
// Use cases depend on this trait, not on the concrete HTTP adapter.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError>;
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ClientError>;
    // Mints a short-lived bearer token for the session; never cached.
    async fn id_token(&self, session: &Session) -> Result<String, ClientError>;
}

// Port for the trip-planning backend. Every call reports failures as a
// `ClientError`; the api facade decides how each one surfaces.
#[async_trait]
pub trait PlannerBackend: Send + Sync {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, ClientError>;
    async fn save_itinerary(
        &self,
        token: &str,
        itinerary: &NewItinerary,
    ) -> Result<String, ClientError>;
    async fn list_itineraries(&self, token: &str) -> Result<Vec<Itinerary>, ClientError>;
    async fn delete_itinerary(&self, token: &str, id: &str) -> Result<(), ClientError>;
    async fn find_hotels(&self, city: &str) -> Result<Vec<Hotel>, ClientError>;
    async fn book_hotel(&self, token: &str, booking: &BookingRequest)
    -> Result<String, ClientError>;
    async fn register_user(&self, token: &str, email: &str, uid: &str) -> Result<(), ClientError>;
}
