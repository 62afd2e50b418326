use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{
    BookingRequest, ClientError, Hotel, Itinerary, NewItinerary, PlannerBackend, TripPlan,
    TripRequest,
};
use crate::interface_adapters::protocol::{
    BookHotelRequest, BookHotelResponse, BookingDetails, ErrorResponse, FindHotelsRequest,
    FindHotelsResponse, ListItinerariesResponse, PlanTripRequest, SaveItineraryResponse,
    SaveUserRequest,
};

// Thin wrapper around reqwest for the planner backend.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    // Appends path segments to the base URL; segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
    request
        .send()
        .await
        .map_err(|err| ClientError::Network(err.to_string()))
}

// Keep upstream status/message so views can show the backend's reason.
async fn failure(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|payload| payload.error);
    ClientError::Backend { status, message }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ClientError::Decode(err.to_string()))
}

// For endpoints that answer with a `success` flag on every status.
async fn decode_flagged<T: DeserializeOwned>(response: Response) -> Result<(u16, T), ClientError> {
    let status = response.status();
    match response.json::<T>().await {
        Ok(payload) => Ok((status.as_u16(), payload)),
        Err(err) if status.is_success() => Err(ClientError::Decode(err.to_string())),
        Err(_) => Err(ClientError::Backend {
            status: status.as_u16(),
            message: None,
        }),
    }
}

#[async_trait]
impl PlannerBackend for BackendClient {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, ClientError> {
        let body = PlanTripRequest {
            city: &request.city,
            interests: &request.interests,
            days: request.days,
        };
        let res = send(self.http.post(self.endpoint(&["plan-trip"])).json(&body)).await?;
        if !res.status().is_success() {
            return Err(failure(res).await);
        }

        decode(res).await
    }

    async fn save_itinerary(
        &self,
        token: &str,
        itinerary: &NewItinerary,
    ) -> Result<String, ClientError> {
        let req = self
            .http
            .post(self.endpoint(&["save-itinerary"]))
            .bearer_auth(token)
            .json(itinerary);
        let res = send(req).await?;
        if !res.status().is_success() {
            return Err(failure(res).await);
        }

        let payload: SaveItineraryResponse = decode(res).await?;
        payload
            .itinerary_id
            .ok_or_else(|| ClientError::Decode("saved itinerary id missing".to_string()))
    }

    async fn list_itineraries(&self, token: &str) -> Result<Vec<Itinerary>, ClientError> {
        let req = self
            .http
            .get(self.endpoint(&["get-itineraries"]))
            .bearer_auth(token);
        let res = send(req).await?;
        if !res.status().is_success() {
            return Err(failure(res).await);
        }

        let payload: ListItinerariesResponse = decode(res).await?;
        Ok(payload.itineraries)
    }

    async fn delete_itinerary(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let req = self
            .http
            .delete(self.endpoint(&["delete-itinerary", id]))
            .bearer_auth(token);
        let res = send(req).await?;
        if !res.status().is_success() {
            return Err(failure(res).await);
        }

        Ok(())
    }

    async fn find_hotels(&self, city: &str) -> Result<Vec<Hotel>, ClientError> {
        let body = FindHotelsRequest { city };
        let res = send(self.http.post(self.endpoint(&["find-hotels"])).json(&body)).await?;

        let (status, payload) = decode_flagged::<FindHotelsResponse>(res).await?;
        if !payload.success {
            return Err(ClientError::Backend {
                status,
                message: payload.error,
            });
        }
        Ok(payload.hotels)
    }

    async fn book_hotel(
        &self,
        token: &str,
        booking: &BookingRequest,
    ) -> Result<String, ClientError> {
        let body = BookHotelRequest {
            token,
            booking_details: BookingDetails {
                hotel: &booking.hotel,
                check_in: booking.check_in,
                check_out: booking.check_out,
                guests: booking.guests,
            },
        };
        let res = send(self.http.post(self.endpoint(&["book-hotel"])).json(&body)).await?;

        let (status, payload) = decode_flagged::<BookHotelResponse>(res).await?;
        if !payload.success {
            return Err(ClientError::Backend {
                status,
                message: payload.error,
            });
        }
        payload
            .booking_id
            .ok_or_else(|| ClientError::Decode("booking id missing".to_string()))
    }

    async fn register_user(&self, token: &str, email: &str, uid: &str) -> Result<(), ClientError> {
        let body = SaveUserRequest { token, email, uid };
        let res = send(self.http.post(self.endpoint(&["save-user"])).json(&body)).await?;
        if !res.status().is_success() {
            return Err(failure(res).await);
        }

        Ok(())
    }
}
