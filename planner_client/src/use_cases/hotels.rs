use chrono::NaiveDate;

use crate::domain::{BookingRequest, ClientError, Hotel, HotelSearchQuery};
use crate::use_cases::action::{Action, ActionState};
use crate::use_cases::api::{ApiClient, Outcome};
use crate::use_cases::session::SessionStore;

// Hotel search page: query -> results grid -> booking notice.
#[derive(Default)]
pub struct HotelsView {
    pub query: HotelSearchQuery,
    hotels: Vec<Hotel>,
    error: Option<String>,
    search: Action,
    booking: Action,
}

impl HotelsView {
    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_state(&self) -> &ActionState {
        self.search.state()
    }

    pub fn booking_state(&self) -> &ActionState {
        self.booking.state()
    }

    // Seeds the query from a city carried by navigation and searches right away.
    pub async fn mount(&mut self, carried_city: Option<String>, api: &ApiClient) {
        let Some(city) = carried_city.filter(|city| !city.trim().is_empty()) else {
            return;
        };
        self.query.city = city;
        if let Err(err) = self.search(api).await {
            tracing::debug!(error = %err, "carried city search skipped.");
        }
    }

    // Stay details used when booking. Guests must be at least one.
    pub fn set_stay(
        &mut self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Result<(), ClientError> {
        if guests == 0 {
            return Err(ClientError::InvalidInput("Guests must be at least 1"));
        }
        self.query.check_in = Some(check_in);
        self.query.check_out = Some(check_out);
        self.query.guests = guests;
        Ok(())
    }

    // Runs a search for the current query city. An empty city is rejected
    // before any request is sent.
    pub async fn search(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        let city = self.query.city.trim().to_string();
        if city.is_empty() {
            return Err(ClientError::InvalidInput("City is required"));
        }
        let Some(ticket) = self.search.begin() else {
            return Ok(());
        };
        self.error = None;
        self.hotels.clear();

        match api.find_hotels(&city).await {
            Outcome::Success(hotels) => {
                if self.search.succeed(ticket) {
                    self.hotels = hotels;
                }
            }
            Outcome::Failure(message) => {
                if self.search.fail(ticket, message.clone()) {
                    self.error = Some(message);
                }
            }
        }
        Ok(())
    }

    // Books one of the listed hotels; returns the notice to show.
    pub async fn book(&mut self, hotel_id: &str, api: &ApiClient, session: &SessionStore) -> String {
        if !session.is_signed_in() {
            return "Please login to book a hotel".to_string();
        }
        let (Some(check_in), Some(check_out)) = (self.query.check_in, self.query.check_out) else {
            return "Please select check-in and check-out dates".to_string();
        };
        let Some(hotel) = self.hotels.iter().find(|hotel| hotel.id == hotel_id).cloned() else {
            return format!("No hotel with id {hotel_id} in the results");
        };
        let Some(ticket) = self.booking.begin() else {
            return "Booking in progress...".to_string();
        };

        let token = match session.token().await {
            Ok(token) => token,
            Err(err) => {
                tracing::error!(error = %err, "could not obtain token for booking.");
                let notice = "Failed to process booking".to_string();
                self.booking.fail(ticket, notice.clone());
                return notice;
            }
        };

        let name = hotel.name.clone();
        let request = BookingRequest {
            hotel,
            check_in,
            check_out,
            guests: self.query.guests,
        };
        match api.book_hotel(&token, &request).await {
            Outcome::Success(booking_id) => {
                self.booking.succeed(ticket);
                format!("Booking confirmed for {name}! Booking ID: {booking_id}")
            }
            Outcome::Failure(message) => {
                self.booking.fail(ticket, message.clone());
                message
            }
        }
    }
}
