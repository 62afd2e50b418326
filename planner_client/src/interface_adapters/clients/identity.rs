use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{ClientError, IdentityProvider, Session};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    refresh_token: String,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorResponse {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

/// Email/password identity over the Identity Toolkit REST protocol.
///
/// Accounts are signed in against `identity_url`; bearer tokens are minted
/// from the refresh token against `token_url` on every request.
#[derive(Clone)]
pub struct IdentityToolkitClient {
    http: Client,
    identity_url: Url,
    token_url: Url,
    api_key: String,
}

impl IdentityToolkitClient {
    pub fn new(
        identity_url: Url,
        token_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            identity_url,
            token_url,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, base: &Url, segment: &str) -> Url {
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(segment);
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }

    async fn password_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let url = self.endpoint(&self.identity_url, method);
        let res = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;
        if !res.status().is_success() {
            return Err(rejection(res).await);
        }

        let account = res
            .json::<AccountResponse>()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))?;
        Ok(Session {
            uid: account.local_id,
            email: account.email,
            refresh_token: account.refresh_token,
        })
    }
}

// Provider rejections carry a machine code such as EMAIL_EXISTS.
async fn rejection(response: Response) -> ClientError {
    let status = response.status();
    match response.json::<ProviderErrorResponse>().await {
        Ok(payload) => ClientError::Auth(payload.error.message),
        Err(_) => ClientError::Auth(format!("identity provider returned {status}")),
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.password_call("accounts:signInWithPassword", email, password)
            .await
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.password_call("accounts:signUp", email, password).await
    }

    async fn id_token(&self, session: &Session) -> Result<String, ClientError> {
        let body = RefreshRequest {
            grant_type: "refresh_token",
            refresh_token: &session.refresh_token,
        };
        let url = self.endpoint(&self.token_url, "token");
        let res = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;
        if !res.status().is_success() {
            return Err(rejection(res).await);
        }

        let payload = res
            .json::<RefreshResponse>()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))?;
        Ok(payload.id_token)
    }
}
