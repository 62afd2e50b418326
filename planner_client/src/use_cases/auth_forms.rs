use crate::domain::{ClientError, View};
use crate::use_cases::action::{Action, ActionState};
use crate::use_cases::app::Navigation;
use crate::use_cases::session::SessionStore;

fn require_credentials(email: &str, password: &str) -> Result<(), ClientError> {
    if email.trim().is_empty() {
        return Err(ClientError::InvalidInput("Email is required"));
    }
    if password.is_empty() {
        return Err(ClientError::InvalidInput("Password is required"));
    }
    Ok(())
}

#[derive(Default)]
pub struct LoginView {
    error: Option<String>,
    submit: Action,
}

impl LoginView {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> &ActionState {
        self.submit.state()
    }

    // Signs in and sends the user home; failures stay on the page.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        session: &SessionStore,
    ) -> Option<Navigation> {
        if let Err(err) = require_credentials(email, password) {
            self.error = Some(err.user_message());
            return None;
        }
        let ticket = self.submit.begin()?;
        self.error = None;

        match session.login(email.trim(), password).await {
            Ok(_) => {
                self.submit.succeed(ticket);
                Some(Navigation::to(View::Home))
            }
            Err(_) => {
                let message = "Failed to log in. Please check your credentials.";
                if self.submit.fail(ticket, message) {
                    self.error = Some(message.to_string());
                }
                None
            }
        }
    }
}

#[derive(Default)]
pub struct SignupView {
    error: Option<String>,
    submit: Action,
}

impl SignupView {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> &ActionState {
        self.submit.state()
    }

    // Creates and registers the account, then sends the user to login.
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        session: &SessionStore,
    ) -> Option<Navigation> {
        if let Err(err) = require_credentials(email, password) {
            self.error = Some(err.user_message());
            return None;
        }
        let ticket = self.submit.begin()?;
        self.error = None;

        match session.signup(email.trim(), password).await {
            Ok(_) => {
                self.submit.succeed(ticket);
                Some(Navigation::to(View::Login))
            }
            Err(err) => {
                let message = match err {
                    ClientError::Registration(_) => "Failed to save user in backend".to_string(),
                    other => other.user_message(),
                };
                if self.submit.fail(ticket, message.clone()) {
                    self.error = Some(message);
                }
                None
            }
        }
    }
}
