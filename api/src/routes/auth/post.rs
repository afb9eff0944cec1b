use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use common::{config, format_validation_errors, state::AppState};
use db::models::email_verification_token::Model as EmailVerificationToken;
use db::models::password_reset_token::Model as PasswordResetToken;
use db::models::user::{self, Model as UserModel, Role};

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::services::email::EmailService;

lazy_static::lazy_static! {
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new("^[A-Za-z0-9_.-]{3,64}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must be 3-64 characters (letters, digits, '_', '.', '-')"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AuthUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_email_verified: bool,
    pub token: String,
    pub expires_at: String,
}

impl AuthUserResponse {
    fn from_user(user: UserModel, token: String, expires_at: String) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_email_verified: user.is_email_verified,
            token,
            expires_at,
        }
    }
}

async fn issue_verification_email(db: &DatabaseConnection, user: &UserModel) {
    let expiry = config::verification_token_expiry_minutes() as i64;
    match EmailVerificationToken::create(db, user.id, expiry).await {
        Ok(token) => {
            if let Err(e) = EmailService::send_verification_email(&user.email, &token.token).await {
                warn!(user = user.id, "Failed to send verification email: {e}");
            }
        }
        Err(e) => warn!(user = user.id, "Failed to issue verification token: {e}"),
    }
}

/// POST /auth/register
///
/// Register a new user. New accounts always get the `participant` role; a
/// verification email goes out after creation (a send failure is logged but
/// does not fail registration).
///
/// ### Request Body
/// ```json
/// {
///   "username": "jdoe",
///   "email": "user@example.com",
///   "password": "strongpassword",
///   "first_name": "Jane",
///   "last_name": "Doe"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "jdoe",
///     "email": "user@example.com",
///     "first_name": "Jane",
///     "last_name": "Doe",
///     "role": "participant",
///     "is_email_verified": false,
///     "token": "jwt_token_here",
///     "expires_at": "2026-05-23T11:00:00Z"
///   },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (duplicate username or email)
/// - `500 Internal Server Error`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthUserResponse>::error(error_message)),
        );
    }

    let db = state.db();

    match UserModel::find_by_username(db, &req.username).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "A user with this username already exists",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
        _ => {}
    }

    match UserModel::find_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
        _ => {}
    }

    match UserModel::create(
        db,
        &req.username,
        &req.email,
        &req.password,
        &req.first_name,
        &req.last_name,
        Role::Participant,
    )
    .await
    {
        Ok(user) => {
            issue_verification_email(db, &user).await;

            let (token, expires_at) = generate_jwt(user.id, user.is_admin());
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    AuthUserResponse::from_user(user, token, expires_at),
                    "User registered successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AuthUserResponse>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email address.
    pub username: String,
    pub password: String,
}

/// POST /auth/login
///
/// Authenticate an existing user and issue a JWT. The `username` field also
/// accepts the account's email address.
///
/// ### Responses
///
/// - `200 OK` — same payload shape as `/auth/register`
/// - `401 Unauthorized`
/// ```json
/// {
///   "success": false,
///   "message": "Invalid username or password"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match UserModel::verify_credentials(state.db(), &req.username, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(user.id, user.is_admin());
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    AuthUserResponse::from_user(user, token, expires_at),
                    "Login successful",
                )),
            )
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<AuthUserResponse>::error(
                "Invalid username or password",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AuthUserResponse>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// POST /auth/verify-email
///
/// Consume an email-verification token. Tokens are single-use and
/// expiry-checked.
///
/// ### Responses
/// - `200 OK` — email verified
/// - `400 Bad Request` — invalid, used or expired token
pub async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> impl IntoResponse {
    let db = state.db();

    let token = match EmailVerificationToken::find_valid_token(db, &req.token).await {
        Ok(Some(token)) => token,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error("Invalid or expired token")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    let user = match UserModel::find_by_id(db, token.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error("Invalid or expired token")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    let mut active: user::ActiveModel = user.into();
    active.is_email_verified = Set(true);
    active.updated_at = Set(chrono::Utc::now());
    if let Err(e) = active.update(db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        );
    }

    if let Err(e) = token.mark_as_used(db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success((), "Email verified successfully")),
    )
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// POST /auth/resend-verification
///
/// Issue a fresh verification token when the account exists and is still
/// unverified. Always returns `200 OK` so the endpoint cannot be used to
/// probe which addresses have accounts.
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(req): Json<ResendVerificationRequest>,
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
    if let Ok(Some(user)) = UserModel::find_by_email(db, &req.email).await {
        if !user.is_email_verified {
            issue_verification_email(db, &user).await;
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            (),
            "If the email is registered, a verification link has been sent",
        )),
    )
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// POST /auth/request-password-reset
///
/// Issue a password reset token and email it. Always returns `200 OK`
/// (no account enumeration); requests beyond the per-user hourly limit are
/// silently dropped.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
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
    if let Ok(Some(user)) = UserModel::find_by_email(db, &req.email).await {
        let recent = PasswordResetToken::count_recent_for_user(db, user.id)
            .await
            .unwrap_or(u64::MAX);

        if recent < config::max_password_reset_requests_per_hour() as u64 {
            let expiry = config::reset_token_expiry_minutes() as i64;
            match PasswordResetToken::create(db, user.id, expiry).await {
                Ok(token) => {
                    if let Err(e) =
                        EmailService::send_password_reset_email(&user.email, &token.token).await
                    {
                        warn!(user = user.id, "Failed to send password reset email: {e}");
                    }
                }
                Err(e) => warn!(user = user.id, "Failed to issue password reset token: {e}"),
            }
        } else {
            warn!(user = user.id, "Password reset rate limit hit");
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            (),
            "If the email is registered, a reset link has been sent",
        )),
    )
}

#[derive(Debug, Deserialize)]
pub struct VerifyResetTokenRequest {
    pub token: String,
}

/// POST /auth/verify-reset-token
///
/// Check a reset token without consuming it, so the frontend can show the
/// password form only for live tokens.
pub async fn verify_reset_token(
    State(state): State<AppState>,
    Json(req): Json<VerifyResetTokenRequest>,
) -> impl IntoResponse {
    match PasswordResetToken::find_valid_token(state.db(), &req.token).await {
        Ok(Some(_)) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Token is valid")),
        ),
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Invalid or expired token")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// POST /auth/reset-password
///
/// Consume a reset token and set a new password.
///
/// ### Responses
/// - `200 OK` — password updated
/// - `400 Bad Request` — invalid token or weak password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
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

    let token = match PasswordResetToken::find_valid_token(db, &req.token).await {
        Ok(Some(token)) => token,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error("Invalid or expired token")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    let user = match UserModel::find_by_id(db, token.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error("Invalid or expired token")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    let password_hash = match UserModel::hash_password(&req.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!(
                    "Failed to hash password: {e}"
                ))),
            );
        }
    };

    let mut active: user::ActiveModel = user.into();
    active.password_hash = Set(password_hash);
    active.updated_at = Set(chrono::Utc::now());
    if let Err(e) = active.update(db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        );
    }

    if let Err(e) = token.mark_as_used(db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success((), "Password reset successfully")),
    )
}
