//! Repository behaviour against a live PostgreSQL instance.
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` pointing at a server
//! that allows creating databases.

mod common;

use std::sync::Arc;

use account_service::category::errors::CategoryError;
use account_service::category::models::Category;
use account_service::category::models::CategoryName;
use account_service::category::ports::CategoryRepository;
use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::repositories::PostgresCategoryRepository;
use account_service::repositories::PostgresUserRepository;
use account_service::user::errors::UserError;
use account_service::user::ports::UserRepository;
use chrono::Utc;
use common::TestApp;
use common::TestDb;
use reqwest::StatusCode;
use serde_json::json;

const RACERS: usize = 8;

fn user(email: &str) -> User {
    User {
        id: UserId::new(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        first_name: None,
        last_name: None,
        password_hash: Some("$argon2id$hash".to_string()),
        created_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore]
async fn test_postgres_account_lifecycle() {
    let app = TestApp::spawn_with_postgres().await;
    app.create_user("ada@example.com", "p1").await;

    let response = app
        .post("/auth/create-user")
        .json(&json!({ "email": "ada@example.com", "password": "p2" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let token = app.token_for("ada@example.com", "p1").await;

    let response = app
        .patch_authenticated("/auth/update-user", &token)
        .json(&json!({ "first_name": "Ada" }))
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["first_name"], "Ada");
    assert!(body["last_name"].is_null());

    let response = app
        .delete_authenticated("/auth/delete-user", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_postgres_categories_cascade() {
    let app = TestApp::spawn_with_postgres().await;
    app.create_user("ada@example.com", "p1").await;
    let token = app.token_for("ada@example.com", "p1").await;

    for name in ["Savings", "Car", "Food"] {
        let response = app
            .post_authenticated("/categories", &token)
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let body: serde_json::Value = app
        .get_authenticated("/categories", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!([{ "name": "Car" }, { "name": "Food" }, { "name": "Savings" }])
    );

    app.delete_authenticated("/auth/delete-user", &token)
        .send()
        .await
        .expect("Failed to execute request");

    let db = app.db.as_ref().expect("postgres app has a database");
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn test_postgres_concurrent_creates_with_same_email() {
    let db = TestDb::new().await;
    let repository = Arc::new(PostgresUserRepository::new(db.pool.clone()));

    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move { repository.create(user("race@example.com")).await })
        })
        .collect();

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(UserError::EmailAlreadyExists(_)) => duplicates += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(duplicates, RACERS - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn test_postgres_concurrent_creates_with_same_category() {
    let db = TestDb::new().await;
    let users = PostgresUserRepository::new(db.pool.clone());
    let categories = Arc::new(PostgresCategoryRepository::new(db.pool.clone()));
    let owner = users.create(user("ada@example.com")).await.unwrap();

    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let categories = Arc::clone(&categories);
            tokio::spawn(async move {
                categories
                    .create(Category {
                        user_id: owner.id,
                        name: CategoryName::new("Food".to_string()).unwrap(),
                    })
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(CategoryError::AlreadyExists(_)) => duplicates += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(duplicates, RACERS - 1);
    assert_eq!(categories.list_by_user(&owner.id).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_postgres_category_for_missing_owner() {
    let db = TestDb::new().await;
    let categories = PostgresCategoryRepository::new(db.pool.clone());

    let result = categories
        .create(Category {
            user_id: UserId::new(),
            name: CategoryName::new("Food".to_string()).unwrap(),
        })
        .await;

    assert!(matches!(result, Err(CategoryError::OwnerNotFound(_))));
}
