use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde::Deserialize;
use tracing::error;
use validator::Validate;

use common::{config, format_validation_errors, state::AppState};
use db::models::email_change_request::Model as EmailChangeRequest;
use db::models::user::{self, Model as UserModel};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::services::email::EmailService;

#[derive(Debug, Deserialize, Validate)]
pub struct RequestEmailChangeRequest {
    #[validate(email(message = "Invalid email format"))]
    pub new_email: String,
}

/// POST /me/request-email-change
///
/// Start the email-change flow: a six-digit code is generated and mailed to
/// the *new* address. Entering the code proves the caller controls it.
///
/// ### Responses
/// - `200 OK` — code sent
/// - `409 Conflict` — the address already belongs to an account
/// - `500 Internal Server Error` — the code could not be emailed
pub async fn request_email_change(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<RequestEmailChangeRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = state.db();

    match UserModel::find_by_email(db, &req.new_email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<()>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
        _ => {}
    }

    let expiry = config::email_change_code_expiry_minutes() as i64;
    let request = match EmailChangeRequest::create(db, claims.sub, &req.new_email, expiry).await {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    // The whole point of this endpoint is delivering the code, so a send
    // failure is a hard error here.
    if let Err(e) =
        EmailService::send_email_change_code(&request.new_email, &request.verification_code).await
    {
        error!(user = claims.sub, "Failed to send email change code: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(
                "Failed to send the verification code",
            )),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            (),
            "A verification code has been sent to the new address",
        )),
    )
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmEmailChangeRequest {
    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,
}

/// POST /me/confirm-email-change
///
/// Consume the emailed code and swap the account's email address. The code
/// record allows five wrong entries before it is burned; it is single-use
/// and expiry-checked. A successful swap also marks the email verified,
/// since the code proved ownership of the new address.
///
/// ### Responses
/// - `200 OK` — email swapped, updated profile returned
/// - `400 Bad Request` — wrong code, or no live request
pub async fn confirm_email_change(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ConfirmEmailChangeRequest>,
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

    let request = match EmailChangeRequest::find_active_for_user(db, claims.sub).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UserResponse>::error(
                    "No active email change request",
                )),
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

    if request.verification_code != req.code {
        if let Err(e) = request.register_failed_attempt(db).await {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error("Invalid code")),
        );
    }

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
    active.email = Set(request.new_email.clone());
    active.is_email_verified = Set(true);
    active.updated_at = Set(chrono::Utc::now());

    let updated = match active.update(db).await {
        Ok(updated) => updated,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    if let Err(e) = request.mark_as_used(db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {e}"
            ))),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse::from(updated),
            "Email updated successfully",
        )),
    )
}
