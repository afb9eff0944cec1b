use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde::Deserialize;
use validator::Validate;

use common::{format_validation_errors, state::AppState};
use db::models::user::{self, Model as UserModel};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,

    pub email_notifications: Option<bool>,
}

/// PUT /me
///
/// Partial update of the caller's own profile: names and the announcement
/// email opt-in. Email changes go through the OTP flow instead.
///
/// ### Request Body (all fields optional)
/// ```json
/// {
///   "first_name": "Jane",
///   "last_name": "Doe",
///   "email_notifications": false
/// }
/// ```
///
/// ### Responses
/// - `200 OK` — the updated profile
/// - `400 Bad Request` — validation failure
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateMeRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = state.db();
    let user = match UserModel::find_by_id(db, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<UserResponse>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    let mut active: user::ActiveModel = user.into();
    if let Some(first_name) = req.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = req.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email_notifications) = req.email_notifications {
        active.email_notifications = Set(email_notifications);
    }
    active.updated_at = Set(chrono::Utc::now());

    match active.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(updated),
                "Profile updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}
