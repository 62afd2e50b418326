use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{ClientError, IdentityProvider, Session};
use crate::use_cases::api::ApiClient;

/// Owner of the signed-in identity.
///
/// One instance is created at start-up and handed to every view through the
/// app context. Views only read it; login, signup and logout are the only
/// writers. Changes are published on a watch channel so observers can
/// re-evaluate navigation.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    api: ApiClient,
    current: watch::Sender<Option<Session>>,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn IdentityProvider>, api: ApiClient) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            provider,
            api,
            current,
        }
    }

    /// Signs in through the provider. A failed attempt leaves the current
    /// session untouched.
    #[tracing::instrument(name = "login", skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let session = self
            .provider
            .sign_in(email, password)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "login rejected."))?;

        tracing::info!(uid = %session.uid, "signed in.");
        self.current.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Creates the provider account, then registers it with the backend.
    ///
    /// The provider signs the new user in, so the session is published before
    /// registration. When the backend refuses, the provider account is kept
    /// and `ClientError::Registration` is returned.
    #[tracing::instrument(name = "signup", skip_all)]
    pub async fn signup(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let session = self
            .provider
            .create_account(email, password)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "account creation rejected."))?;
        self.current.send_replace(Some(session.clone()));

        let token = self.provider.id_token(&session).await?;
        self.api
            .register_user(&token, &session.email, &session.uid)
            .await
            .map_err(|err| ClientError::Registration(err.user_message()))?;

        tracing::info!(uid = %session.uid, "account registered.");
        Ok(session)
    }

    // Clears the session; calling it again is a no-op.
    pub fn logout(&self) {
        let cleared = self.current.send_if_modified(|current| current.take().is_some());
        if cleared {
            tracing::info!("signed out.");
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    /// Fresh bearer token for the current session, requested from the
    /// provider on every call. Fails with `NotAuthenticated` before any
    /// network traffic when nobody is signed in.
    ///
    /// When the provider refuses the refresh (expired or disabled account)
    /// the session is cleared, so observers send the user back to login.
    pub async fn token(&self) -> Result<String, ClientError> {
        let session = self
            .current_session()
            .ok_or(ClientError::NotAuthenticated)?;
        match self.provider.id_token(&session).await {
            Err(ClientError::Auth(code)) => {
                tracing::warn!(uid = %session.uid, code = %code, "token refresh rejected.");
                self.logout();
                Err(ClientError::Auth(code))
            }
            other => other,
        }
    }
}
