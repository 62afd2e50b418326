use crate::domain::{ClientError, Itinerary, View};
use crate::use_cases::action::{Action, ActionState};
use crate::use_cases::api::ApiClient;
use crate::use_cases::app::Navigation;
use crate::use_cases::session::SessionStore;

// Saved-itinerary dashboard: list, detail overlay, delete.
#[derive(Default)]
pub struct DashboardView {
    itineraries: Vec<Itinerary>,
    // Detail overlay; opened and closed independently of fetching.
    selected: Option<Itinerary>,
    error: Option<String>,
    fetch: Action,
    delete: Action,
}

impl DashboardView {
    pub fn itineraries(&self) -> &[Itinerary] {
        &self.itineraries
    }

    pub fn selected(&self) -> Option<&Itinerary> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn fetch_state(&self) -> &ActionState {
        self.fetch.state()
    }

    pub fn delete_state(&self) -> &ActionState {
        self.delete.state()
    }

    // Loads the saved itineraries. Without a session the error is set and
    // nothing is sent.
    pub async fn load(&mut self, api: &ApiClient, session: &SessionStore) {
        let Some(ticket) = self.fetch.begin() else {
            return;
        };
        self.error = None;

        let result: Result<Vec<Itinerary>, ClientError> = async {
            let token = session.token().await?;
            api.list_itineraries(&token).await
        }
        .await;

        match result {
            Ok(itineraries) => {
                if self.fetch.succeed(ticket) {
                    self.itineraries = itineraries;
                }
            }
            Err(err) => {
                let message = match err {
                    ClientError::NotAuthenticated => {
                        "Please log in to view your itineraries".to_string()
                    }
                    ClientError::Network(_) => {
                        "Network error. Please check your connection.".to_string()
                    }
                    ClientError::Backend {
                        message: Some(message),
                        ..
                    } => message,
                    ClientError::Backend { message: None, .. } | ClientError::Decode(_) => {
                        "Failed to fetch itineraries".to_string()
                    }
                    other => other.user_message(),
                };
                if self.fetch.fail(ticket, message.clone()) {
                    self.error = Some(message);
                }
            }
        }
    }

    // Deletes one saved itinerary. On success exactly that entry leaves the
    // list; on failure the list is unchanged and the notice is returned.
    pub async fn delete(
        &mut self,
        id: &str,
        api: &ApiClient,
        session: &SessionStore,
    ) -> Option<String> {
        let Some(ticket) = self.delete.begin() else {
            return Some("Delete in progress...".to_string());
        };

        let token = match session.token().await {
            Ok(token) => token,
            Err(err) => {
                tracing::error!(error = %err, "could not obtain token for delete.");
                let notice = "Error deleting itinerary".to_string();
                self.delete.fail(ticket, notice.clone());
                return Some(notice);
            }
        };

        match api.delete_itinerary(&token, id).await {
            Ok(()) => {
                if self.delete.succeed(ticket) {
                    self.itineraries.retain(|itinerary| itinerary.id != id);
                    if self.selected.as_ref().is_some_and(|selected| selected.id == id) {
                        self.selected = None;
                    }
                }
                None
            }
            Err(err) => {
                let notice = match err {
                    ClientError::Backend { .. } => "Failed to delete itinerary",
                    _ => "Error deleting itinerary",
                };
                self.delete.fail(ticket, notice);
                Some(notice.to_string())
            }
        }
    }

    // Opens the detail overlay; false when the id is not listed.
    pub fn open(&mut self, id: &str) -> bool {
        self.selected = self
            .itineraries
            .iter()
            .find(|itinerary| itinerary.id == id)
            .cloned();
        self.selected.is_some()
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    // Hotels page seeded with the itinerary's city.
    pub fn book_hotels(&self, id: &str) -> Option<Navigation> {
        self.itineraries
            .iter()
            .find(|itinerary| itinerary.id == id)
            .map(|itinerary| Navigation::with_city(View::Hotels, &itinerary.city))
    }
}
