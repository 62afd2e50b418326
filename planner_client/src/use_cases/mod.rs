pub mod action;
pub mod api;
pub mod app;
pub mod auth_forms;
pub mod dashboard;
pub mod guard;
pub mod hotels;
pub mod planner;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::{Action, ActionState, Ticket};
pub use api::{ApiClient, Outcome};
pub use app::{App, AppContext, Navigation};
pub use guard::Resolution;
pub use session::SessionStore;
