use std::fmt;

use crate::category::errors::CategoryNameError;
use crate::domain::user::models::UserId;

/// A named record owned by exactly one user.
///
/// The natural key is `(user_id, name)`; ownership is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub user_id: UserId,
    pub name: CategoryName,
}

/// Category name value type
///
/// Non-blank, at most 100 characters. Names are compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryName(String);

impl CategoryName {
    const MAX_LENGTH: usize = 100;

    /// Create a new validated category name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name exceeds 100 characters
    pub fn new(name: String) -> Result<Self, CategoryNameError> {
        if name.trim().is_empty() {
            return Err(CategoryNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(CategoryNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
