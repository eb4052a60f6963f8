use async_trait::async_trait;

use crate::category::errors::CategoryError;
use crate::category::models::Category;
use crate::category::models::CategoryName;
use crate::domain::user::models::UserId;

/// Port for category domain service operations.
#[async_trait]
pub trait CategoryServicePort: Send + Sync + 'static {
    /// Create a category for a user.
    ///
    /// # Errors
    /// * `AlreadyExists` - The user already has a category with this name
    /// * `OwnerNotFound` - The user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_category(
        &self,
        user_id: &UserId,
        name: CategoryName,
    ) -> Result<Category, CategoryError>;

    /// List a user's categories, ordered by name. Empty when there are none.
    async fn list_categories(&self, user_id: &UserId) -> Result<Vec<Category>, CategoryError>;

    /// Delete a user's category by name.
    ///
    /// # Errors
    /// * `NotFound` - The user has no category with this name
    /// * `DatabaseError` - Database operation failed
    async fn delete_category(
        &self,
        user_id: &UserId,
        name: &CategoryName,
    ) -> Result<(), CategoryError>;
}

/// Persistence operations for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    /// Insert a category unless `(user_id, name)` already exists.
    ///
    /// # Errors
    /// * `AlreadyExists` - Key already present
    /// * `OwnerNotFound` - Referenced user does not exist
    async fn create(&self, category: Category) -> Result<Category, CategoryError>;

    /// All categories owned by a user, ordered by name.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Category>, CategoryError>;

    /// Remove a category.
    ///
    /// # Errors
    /// * `NotFound` - No category with that key
    async fn delete(&self, user_id: &UserId, name: &CategoryName) -> Result<(), CategoryError>;
}
