use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde::Deserialize;
use std::str::FromStr;

use common::state::AppState;
use db::models::user::{self, Model as UserModel, Role};

use crate::response::ApiResponse;
use crate::routes::common::UserResponse;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub role: Option<String>,
    pub is_email_verified: Option<bool>,
}

/// PUT /api/users/{user_id}
///
/// Admin update of another account: role and the verified flag.
///
/// ### Request Body (all fields optional)
/// ```json
/// {
///   "role": "admin",
///   "is_email_verified": true
/// }
/// ```
///
/// ### Responses
/// - `200 OK` — updated user
/// - `400 Bad Request` — unknown role value
/// - `404 Not Found`
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let role = match &req.role {
        Some(value) => match Role::from_str(value) {
            Ok(role) => Some(role),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<UserResponse>::error(
                        "Role must be 'admin' or 'participant'",
                    )),
                );
            }
        },
        None => None,
    };

    let user = match UserModel::find_by_id(db, user_id).await {
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
    if let Some(role) = role {
        active.role = Set(role.to_string());
    }
    if let Some(is_email_verified) = req.is_email_verified {
        active.is_email_verified = Set(is_email_verified);
    }
    active.updated_at = Set(chrono::Utc::now());

    match active.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(updated),
                "User updated successfully",
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
