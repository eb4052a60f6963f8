use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::authentication::errors::AuthenticationError;
use crate::inbound::http::router::AppState;

const INCORRECT_CREDENTIALS: &str = "Incorrect username or password";

/// Password grant: `username` carries the account email.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let access_token = state
        .authentication_service
        .login(&form.username, &form.password)
        .await
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                ApiError::Unauthorized(INCORRECT_CREDENTIALS.to_string())
            }
            other => ApiError::from(other),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            access_token,
            token_type: "bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}
