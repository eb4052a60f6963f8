use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::CategoryData;
use crate::category::errors::CategoryError;
use crate::domain::category::models::CategoryName;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_category(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    let name = CategoryName::new(body.name).map_err(CategoryError::from)?;

    state
        .category_service
        .create_category(&user.id, name)
        .await
        .map_err(ApiError::from)
        .map(|ref category| ApiSuccess::new(StatusCode::CREATED, category.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCategoryRequest {
    name: String,
}
