use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::authentication::errors::AuthenticationError;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn update_user_password(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .authentication_service
        .change_password(&user.id, &body.old_password, &body.new_password)
        .await
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                ApiError::BadRequest("Current password is incorrect".to_string())
            }
            other => ApiError::from(other),
        })
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePasswordRequest {
    old_password: String,
    new_password: String,
}
