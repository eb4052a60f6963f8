use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;

/// User aggregate entity.
///
/// `password_hash` is a PHC string and stays inside the service; outward
/// projections are built field by field and never include it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Comparison is
/// exact: no case folding or other normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self {
            email,
            password,
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }
}

/// Partial profile update.
///
/// The outer `Option` says whether the field was supplied at all; the inner
/// one is the new value, so `Some(None)` clears a name and `None` leaves it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileCommand {
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
}

impl UpdateProfileCommand {
    /// Apply the supplied fields to a user, leaving the others untouched.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            password_hash: Some("$argon2id$hash".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("ada@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_email_is_not_normalized() {
        let upper = EmailAddress::new("Ada@Example.com".to_string()).unwrap();
        let lower = EmailAddress::new("ada@example.com".to_string()).unwrap();
        assert_ne!(upper, lower);
        assert_eq!(upper.as_str(), "Ada@Example.com");
    }

    #[test]
    fn test_update_applies_only_supplied_fields() {
        let mut target = user();
        let command = UpdateProfileCommand {
            first_name: Some(Some("Augusta".to_string())),
            last_name: None,
        };

        command.apply_to(&mut target);

        assert_eq!(target.first_name.as_deref(), Some("Augusta"));
        assert_eq!(target.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_update_can_clear_a_field() {
        let mut target = user();
        let command = UpdateProfileCommand {
            first_name: None,
            last_name: Some(None),
        };

        command.apply_to(&mut target);

        assert_eq!(target.first_name.as_deref(), Some("Ada"));
        assert_eq!(target.last_name, None);
    }
}
