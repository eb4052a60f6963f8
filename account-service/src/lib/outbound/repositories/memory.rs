//! In-memory storage backend.
//!
//! Implements both repository ports over one lock-guarded state, suitable for
//! development and tests. Every operation holds the write lock across its
//! check-and-write sequence, so duplicate detection is exact under
//! concurrency. Nothing survives a restart.

use std::collections::BTreeMap;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::category::errors::CategoryError;
use crate::category::models::Category;
use crate::category::models::CategoryName;
use crate::category::ports::CategoryRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, User>,
    /// Categories keyed by owner, then by name.
    categories: HashMap<UserId, BTreeMap<CategoryName, Category>>,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: &UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        command.apply_to(user);
        Ok(user.clone())
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<User, UserError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.password_hash = Some(password_hash);
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut state = self.state.write().await;

        if state.users.remove(id).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }
        state.categories.remove(id);

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn create(&self, category: Category) -> Result<Category, CategoryError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&category.user_id) {
            return Err(CategoryError::OwnerNotFound(category.user_id));
        }

        let owned = state.categories.entry(category.user_id).or_default();
        if owned.contains_key(&category.name) {
            return Err(CategoryError::AlreadyExists(category.name.to_string()));
        }

        owned.insert(category.name.clone(), category.clone());
        Ok(category)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Category>, CategoryError> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .get(user_id)
            .map(|owned| owned.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete(&self, user_id: &UserId, name: &CategoryName) -> Result<(), CategoryError> {
        let mut state = self.state.write().await;

        state
            .categories
            .get_mut(user_id)
            .and_then(|owned| owned.remove(name))
            .map(|_| ())
            .ok_or_else(|| CategoryError::NotFound(name.to_string()))
    }
}
