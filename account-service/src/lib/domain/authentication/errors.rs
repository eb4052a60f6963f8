use thiserror::Error;

use crate::user::errors::UserError;

/// Errors raised while signing in, resolving a bearer token, or changing a
/// password.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    /// Unknown email or wrong password; the two are deliberately not
    /// distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error(transparent)]
    User(#[from] UserError),
}

impl From<auth::JwtError> for AuthenticationError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => AuthenticationError::TokenExpired,
            auth::JwtError::MissingClaim(claim) => {
                AuthenticationError::MalformedToken(format!("missing '{}' claim", claim))
            }
            auth::JwtError::InvalidToken(reason) => AuthenticationError::InvalidToken(reason),
            auth::JwtError::EncodingFailed(reason) => AuthenticationError::TokenIssuance(reason),
        }
    }
}
