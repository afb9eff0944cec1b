//! # me Routes Module
//!
//! Routes operating on the authenticated caller's own account. The whole
//! group sits behind the `allow_authenticated` guard.
//!
//! ## Structure
//! - `get.rs` — profile and dashboard
//! - `put.rs` — profile updates
//! - `post.rs` — email-change OTP flow

pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{get, post},
};
use common::state::AppState;

use get::{get_dashboard, get_me};
use post::{confirm_email_change, request_email_change};
use put::update_me;

/// Builds the `/me` route group.
///
/// - `GET /me` → `get_me`
/// - `PUT /me` → `update_me`
/// - `GET /me/dashboard` → `get_dashboard`
/// - `POST /me/request-email-change` → `request_email_change`
/// - `POST /me/confirm-email-change` → `confirm_email_change`
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_me).put(update_me))
        .route("/dashboard", get(get_dashboard))
        .route("/request-email-change", post(request_email_change))
        .route("/confirm-email-change", post(confirm_email_change))
}
