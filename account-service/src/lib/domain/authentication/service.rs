use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::PasswordError;

use crate::authentication::errors::AuthenticationError;
use crate::authentication::ports::AuthenticationPort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// Sign-in and bearer token resolution on top of the user service.
///
/// Holds no state of its own beyond the signing keys inside the shared
/// [`Authenticator`], the configured token lifetime and a throwaway hash
/// used to keep failed sign-ins as slow as successful ones.
pub struct AuthenticationService<US>
where
    US: UserServicePort,
{
    user_service: Arc<US>,
    authenticator: Arc<Authenticator>,
    expiration_hours: i64,
    dummy_hash: String,
}

impl<US> AuthenticationService<US>
where
    US: UserServicePort,
{
    /// # Arguments
    /// * `user_service` - Source of user records
    /// * `authenticator` - Password verification and token signing
    /// * `expiration_hours` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `PasswordError` - The throwaway sign-in hash could not be computed
    pub fn new(
        user_service: Arc<US>,
        authenticator: Arc<Authenticator>,
        expiration_hours: i64,
    ) -> Result<Self, PasswordError> {
        let dummy_hash = authenticator.hash_password(DUMMY_PASSWORD)?;

        Ok(Self {
            user_service,
            authenticator,
            expiration_hours,
            dummy_hash,
        })
    }

    /// Burn one hash verification so that rejecting an unknown account costs
    /// the same as rejecting a wrong password.
    fn reject_without_account(&self, password: &str) -> AuthenticationError {
        self.authenticator.verify_password(password, &self.dummy_hash);
        AuthenticationError::InvalidCredentials
    }
}

const DUMMY_PASSWORD: &str = "sign-in-timing-equaliser";

fn user_not_found(err: UserError) -> AuthenticationError {
    match err {
        UserError::NotFound(id) => AuthenticationError::UserNotFound(id),
        UserError::NotFoundByEmail(email) => AuthenticationError::UserNotFound(email),
        other => AuthenticationError::User(other),
    }
}

#[async_trait]
impl<US> AuthenticationPort for AuthenticationService<US>
where
    US: UserServicePort,
{
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthenticationError> {
        let Ok(email) = EmailAddress::new(email.to_string()) else {
            return Err(self.reject_without_account(password));
        };

        let user = match self.user_service.get_user_by_email(&email).await {
            Ok(user) => user,
            Err(UserError::NotFoundByEmail(_)) => {
                tracing::debug!("Sign-in attempt for unknown email");
                return Err(self.reject_without_account(password));
            }
            Err(e) => return Err(e.into()),
        };

        let Some(stored_hash) = user.password_hash.as_deref() else {
            tracing::debug!(user_id = %user.id, "Sign-in for user without a password");
            return Err(self.reject_without_account(password));
        };

        let claims = Claims::for_subject(user.email.as_str(), self.expiration_hours);

        let result = self
            .authenticator
            .authenticate(password, stored_hash, &claims)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Sign-in with wrong password");
                    AuthenticationError::InvalidCredentials
                }
                auth::AuthenticationError::JwtError(err) => err.into(),
            })?;

        tracing::info!(user_id = %user.id, "User signed in");
        Ok(result.access_token)
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthenticationError> {
        let claims: Claims = self.authenticator.validate_token(token)?;

        let subject = claims
            .sub
            .ok_or_else(|| AuthenticationError::MalformedToken("missing 'sub' claim".to_string()))?;

        let email = EmailAddress::new(subject)
            .map_err(|e| AuthenticationError::MalformedToken(e.to_string()))?;

        self.user_service
            .get_user_by_email(&email)
            .await
            .map_err(user_not_found)
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<User, AuthenticationError> {
        let user = self
            .user_service
            .get_user(user_id)
            .await
            .map_err(user_not_found)?;

        let verified = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| self.authenticator.verify_password(old_password, hash));

        if !verified {
            tracing::debug!(user_id = %user_id, "Password change with wrong current password");
            return Err(AuthenticationError::InvalidCredentials);
        }

        self.user_service
            .update_password(user_id, new_password)
            .await
            .map_err(user_not_found)
    }
}
