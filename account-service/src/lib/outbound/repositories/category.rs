use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::category::errors::CategoryError;
use crate::category::models::Category;
use crate::category::models::CategoryName;
use crate::category::ports::CategoryRepository;
use crate::domain::user::models::UserId;

const CATEGORIES_PKEY: &str = "categories_pkey";

#[derive(sqlx::FromRow)]
struct CategoryRow {
    user_id: Uuid,
    name: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = CategoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            user_id: UserId(row.user_id),
            name: CategoryName::new(row.name)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> CategoryError {
    CategoryError::DatabaseError(e.to_string())
}

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, CategoryError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let existing = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM categories
            WHERE user_id = $1 AND name = $2
            "#,
        )
        .bind(category.user_id.0)
        .bind(category.name.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error)?;

        if existing.is_some() {
            return Err(CategoryError::AlreadyExists(category.name.to_string()));
        }

        sqlx::query(
            r#"
            INSERT INTO categories (user_id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(category.user_id.0)
        .bind(category.name.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(CATEGORIES_PKEY) {
                    return CategoryError::AlreadyExists(category.name.to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return CategoryError::OwnerNotFound(category.user_id);
                }
            }
            database_error(e)
        })?;

        tx.commit().await.map_err(database_error)?;

        Ok(category)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Category>, CategoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT user_id, name
            FROM categories
            WHERE user_id = $1
            ORDER BY name COLLATE "C"
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn delete(&self, user_id: &UserId, name: &CategoryName) -> Result<(), CategoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE user_id = $1 AND name = $2
            "#,
        )
        .bind(user_id.0)
        .bind(name.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(CategoryError::NotFound(name.to_string()));
        }

        Ok(())
    }
}
