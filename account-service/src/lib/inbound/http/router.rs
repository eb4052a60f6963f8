use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::PasswordError;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_category::create_category;
use super::handlers::create_user::create_user;
use super::handlers::delete_category::delete_category;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::list_categories::list_categories;
use super::handlers::login::login;
use super::handlers::update_user::update_user;
use super::handlers::update_user_password::update_user_password;
use super::middleware::authenticate as auth_middleware;
use crate::authentication::ports::AuthenticationPort;
use crate::authentication::service::AuthenticationService;
use crate::category::ports::CategoryRepository;
use crate::category::ports::CategoryServicePort;
use crate::category::service::CategoryService;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;
use crate::user::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub category_service: Arc<dyn CategoryServicePort>,
    pub authentication_service: Arc<dyn AuthenticationPort>,
}

impl AppState {
    /// Wire the services on top of a pair of repositories.
    ///
    /// # Arguments
    /// * `user_repository` - User storage
    /// * `category_repository` - Category storage
    /// * `authenticator` - Password hashing and token signing
    /// * `jwt_expiration_hours` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `PasswordError` - The sign-in timing hash could not be computed
    pub fn wire<UR, CR>(
        user_repository: Arc<UR>,
        category_repository: Arc<CR>,
        authenticator: Arc<Authenticator>,
        jwt_expiration_hours: i64,
    ) -> Result<Self, PasswordError>
    where
        UR: UserRepository,
        CR: CategoryRepository,
    {
        let user_service = Arc::new(UserService::new(user_repository));
        let category_service = Arc::new(CategoryService::new(category_repository));
        let authentication_service = Arc::new(AuthenticationService::new(
            Arc::clone(&user_service),
            authenticator,
            jwt_expiration_hours,
        )?);

        Ok(Self {
            user_service,
            category_service,
            authentication_service,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/token", post(login))
        .route("/auth/create-user", post(create_user))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/auth/get-user", get(get_user))
        .route("/auth/update-user", patch(update_user))
        .route("/auth/update-user-password", patch(update_user_password))
        .route("/auth/delete-user", delete(delete_user))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:name", delete(delete_category))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
