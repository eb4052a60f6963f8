use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::CategoryData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<CategoryData>>, ApiError> {
    state
        .category_service
        .list_categories(&user.id)
        .await
        .map_err(ApiError::from)
        .map(|categories| {
            ApiSuccess::new(
                StatusCode::OK,
                categories.iter().map(CategoryData::from).collect(),
            )
        })
}
