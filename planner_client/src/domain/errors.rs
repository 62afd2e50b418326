use std::fmt;

// Failure kinds shared by every client workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    // Identity provider rejected the credentials or the new account.
    Auth(String),
    // Provider account exists but the backend refused to register it.
    Registration(String),
    // The request never produced a response.
    Network(String),
    // Backend answered with a failure status and maybe a message.
    Backend { status: u16, message: Option<String> },
    // Response body did not have the expected shape.
    Decode(String),
    // Action needs a session and none is present. No request was sent.
    NotAuthenticated,
    // Form input rejected before any request was sent.
    InvalidInput(&'static str),
}

impl ClientError {
    // Text suitable for showing to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Auth(message)
            | ClientError::Registration(message)
            | ClientError::Network(message) => message.clone(),
            ClientError::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::InvalidInput(reason) => (*reason).to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Auth(message) => write!(f, "authentication failed: {message}"),
            ClientError::Registration(message) => write!(f, "registration failed: {message}"),
            ClientError::Network(message) => write!(f, "network error: {message}"),
            ClientError::Backend { status, message } => {
                if let Some(message) = message {
                    write!(f, "backend error {status}: {message}")
                } else {
                    write!(f, "backend error {status}")
                }
            }
            ClientError::Decode(message) => write!(f, "response decode error: {message}"),
            ClientError::NotAuthenticated => write!(f, "not logged in"),
            ClientError::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
        }
    }
}

impl std::error::Error for ClientError {}
