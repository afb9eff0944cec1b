//! # auth Routes Module
//!
//! Defines and wires up routes for the `/auth` endpoint group. All endpoints
//! here are public; they issue or consume credentials rather than require
//! them.
//!
//! ## Structure
//! - `post.rs` — POST handlers (register, login, token flows)

pub mod post;

use axum::{Router, routing::post};
use common::state::AppState;

use post::{
    login, register, request_password_reset, resend_verification, reset_password, verify_email,
    verify_reset_token,
};

/// Builds the `/auth` route group, mapping HTTP methods to handlers.
///
/// - `POST /auth/register` → `register`
/// - `POST /auth/login` → `login`
/// - `POST /auth/verify-email` → `verify_email`
/// - `POST /auth/resend-verification` → `resend_verification`
/// - `POST /auth/request-password-reset` → `request_password_reset`
/// - `POST /auth/verify-reset-token` → `verify_reset_token`
/// - `POST /auth/reset-password` → `reset_password`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify-email", post(verify_email))
        .route("/resend-verification", post(resend_verification))
        .route("/request-password-reset", post(request_password_reset))
        .route("/verify-reset-token", post(verify_reset_token))
        .route("/reset-password", post(reset_password))
}
