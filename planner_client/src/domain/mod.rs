mod entities;
mod errors;
mod ports;
mod views;

// Re-export the domain boundary types and ports.
pub use entities::{
    Budget, BookingRequest, Hotel, HotelSearchQuery, Itinerary, MAX_TRIP_DAYS, NewItinerary,
    Session, TripPlan, TripRequest, UNAVAILABLE_ITINERARY, split_interests,
};
pub use errors::ClientError;
pub use ports::{IdentityProvider, PlannerBackend};
pub use views::View;
