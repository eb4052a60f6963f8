use std::sync::Arc;

use async_trait::async_trait;

use crate::category::errors::CategoryError;
use crate::category::models::Category;
use crate::category::models::CategoryName;
use crate::category::ports::CategoryRepository;
use crate::category::ports::CategoryServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for category operations.
pub struct CategoryService<CR>
where
    CR: CategoryRepository,
{
    repository: Arc<CR>,
}

impl<CR> CategoryService<CR>
where
    CR: CategoryRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> CategoryServicePort for CategoryService<CR>
where
    CR: CategoryRepository,
{
    async fn create_category(
        &self,
        user_id: &UserId,
        name: CategoryName,
    ) -> Result<Category, CategoryError> {
        let category = Category {
            user_id: *user_id,
            name,
        };

        let created = self.repository.create(category).await?;
        tracing::debug!(user_id = %user_id, category = %created.name, "Category created");

        Ok(created)
    }

    async fn list_categories(&self, user_id: &UserId) -> Result<Vec<Category>, CategoryError> {
        self.repository.list_by_user(user_id).await
    }

    async fn delete_category(
        &self,
        user_id: &UserId,
        name: &CategoryName,
    ) -> Result<(), CategoryError> {
        self.repository.delete(user_id, name).await?;
        tracing::debug!(user_id = %user_id, category = %name, "Category deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestCategoryRepository {}

        #[async_trait]
        impl CategoryRepository for TestCategoryRepository {
            async fn create(&self, category: Category) -> Result<Category, CategoryError>;
            async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Category>, CategoryError>;
            async fn delete(&self, user_id: &UserId, name: &CategoryName) -> Result<(), CategoryError>;
        }
    }

    fn name(value: &str) -> CategoryName {
        CategoryName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_category_assigns_owner() {
        let mut repository = MockTestCategoryRepository::new();

        let user_id = UserId::new();
        repository
            .expect_create()
            .withf(move |category| category.user_id == user_id && category.name.as_str() == "Food")
            .times(1)
            .returning(|category| Ok(category));

        let service = CategoryService::new(Arc::new(repository));

        let category = service.create_category(&user_id, name("Food")).await.unwrap();
        assert_eq!(category.user_id, user_id);
        assert_eq!(category.name.as_str(), "Food");
    }

    #[tokio::test]
    async fn test_create_category_duplicate() {
        let mut repository = MockTestCategoryRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|category| Err(CategoryError::AlreadyExists(category.name.to_string())));

        let service = CategoryService::new(Arc::new(repository));

        let result = service.create_category(&UserId::new(), name("Food")).await;
        assert!(matches!(result, Err(CategoryError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_list_categories_empty() {
        let mut repository = MockTestCategoryRepository::new();

        repository
            .expect_list_by_user()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = CategoryService::new(Arc::new(repository));

        let categories = service.list_categories(&UserId::new()).await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_delete_category_not_found() {
        let mut repository = MockTestCategoryRepository::new();

        repository
            .expect_delete()
            .withf(|_, name| name.as_str() == "Food")
            .times(1)
            .returning(|_, name| Err(CategoryError::NotFound(name.to_string())));

        let service = CategoryService::new(Arc::new(repository));

        let result = service.delete_category(&UserId::new(), &name("Food")).await;
        assert!(matches!(result, Err(CategoryError::NotFound(_))));
    }
}
