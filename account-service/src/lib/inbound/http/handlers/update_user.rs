use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::UpdateProfileCommand;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn update_user(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .update_user(&user.id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// Partial profile. An absent key leaves the field alone; an explicit
/// `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    last_name: Option<Option<String>>,
}

// Only runs when the key is present, so `null` becomes `Some(None)`.
fn deserialize_some<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UpdateUserRequest> for UpdateProfileCommand {
    fn from(req: UpdateUserRequest) -> Self {
        UpdateProfileCommand {
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> UpdateProfileCommand {
        serde_json::from_value::<UpdateUserRequest>(value)
            .unwrap()
            .into()
    }

    #[test]
    fn test_absent_fields_are_untouched() {
        let command = parse(serde_json::json!({ "first_name": "Ada" }));

        assert_eq!(command.first_name, Some(Some("Ada".to_string())));
        assert_eq!(command.last_name, None);
    }

    #[test]
    fn test_null_clears_field() {
        let command = parse(serde_json::json!({ "last_name": null }));

        assert_eq!(command.first_name, None);
        assert_eq!(command.last_name, Some(None));
    }

    #[test]
    fn test_email_cannot_be_patched() {
        let result = serde_json::from_value::<UpdateUserRequest>(serde_json::json!({
            "email": "other@example.com"
        }));
        assert!(result.is_err());
    }
}
