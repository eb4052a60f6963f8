use async_trait::async_trait;

use crate::authentication::errors::AuthenticationError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for credential checks and bearer token handling.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Verify an email/password pair and issue an access token whose subject
    /// is the email.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `TokenIssuance` - Token could not be signed
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthenticationError>;

    /// Resolve a bearer token to the user it was issued to.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch or garbage input
    /// * `TokenExpired` - Token is past its expiry
    /// * `MalformedToken` - Token lacks a usable subject
    /// * `UserNotFound` - Subject no longer matches a user
    async fn authenticate(&self, token: &str) -> Result<User, AuthenticationError>;

    /// Replace a user's password after re-verifying the current one.
    ///
    /// # Errors
    /// * `InvalidCredentials` - `old_password` does not match
    /// * `UserNotFound` - User does not exist
    async fn change_password(
        &self,
        user_id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<User, AuthenticationError>;
}
