use crate::domain::{ClientError, NewItinerary, TripPlan, TripRequest, View, split_interests};
use crate::use_cases::action::{Action, ActionState};
use crate::use_cases::api::ApiClient;
use crate::use_cases::app::Navigation;
use crate::use_cases::session::SessionStore;

const LOGIN_TO_SAVE: &str = "Please login to save itineraries";

// Trip planner page: form -> generated plan -> save or look for hotels.
pub struct PlannerView {
    pub city: String,
    pub interests: String,
    pub days: u32,
    plan: Option<TripPlan>,
    generate: Action,
    save: Action,
}

impl Default for PlannerView {
    fn default() -> Self {
        Self {
            city: String::new(),
            interests: String::new(),
            days: 1,
            plan: None,
            generate: Action::default(),
            save: Action::default(),
        }
    }
}

impl PlannerView {
    pub fn plan(&self) -> Option<&TripPlan> {
        self.plan.as_ref()
    }

    pub fn generate_state(&self) -> &ActionState {
        self.generate.state()
    }

    pub fn save_state(&self) -> &ActionState {
        self.save.state()
    }

    // Validates the form and asks the backend for a plan.
    // Invalid input is rejected before any request and leaves state alone.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        let request = TripRequest::new(&self.city, &self.interests, self.days)?;
        let Some(ticket) = self.generate.begin() else {
            return Ok(());
        };
        self.plan = None;

        // Generation degrades to a placeholder plan, so it always settles as success.
        let plan = api.generate_itinerary(&request).await;
        if self.generate.succeed(ticket) {
            self.plan = Some(plan);
        }
        Ok(())
    }

    // Saves the current plan; returns the notice to show.
    pub async fn save(&mut self, api: &ApiClient, session: &SessionStore) -> String {
        if !session.is_signed_in() {
            return LOGIN_TO_SAVE.to_string();
        }
        let Some(plan) = self.plan.clone() else {
            return "Generate an itinerary first".to_string();
        };
        let Some(ticket) = self.save.begin() else {
            return "Saving...".to_string();
        };

        let itinerary = NewItinerary {
            city: self.city.trim().to_string(),
            days: self.days,
            interests: split_interests(&self.interests),
            itinerary: plan.itinerary,
            recommendations: plan.recommendations,
            weather: plan.weather,
            budget: plan.budget,
        };
        let result: Result<String, ClientError> = async {
            let token = session.token().await?;
            api.save_itinerary(&token, &itinerary).await
        }
        .await;

        let notice = match result {
            Ok(_) => {
                self.save.succeed(ticket);
                return "Itinerary saved to Dashboard!".to_string();
            }
            Err(ClientError::NotAuthenticated) => LOGIN_TO_SAVE.to_string(),
            Err(err) => format!("Failed to save itinerary: {}", err.user_message()),
        };
        self.save.fail(ticket, notice.clone());
        notice
    }

    // Hotels page seeded with the planned city.
    pub fn find_hotels(&self) -> Option<Navigation> {
        self.plan
            .as_ref()
            .map(|_| Navigation::with_city(View::Hotels, self.city.trim()))
    }
}
