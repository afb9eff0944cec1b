//! # evaluations Routes Module
//!
//! Routes for the `/evaluations` endpoint group. Submission and the
//! available-forms listing are authenticated; the per-seminar analytics
//! endpoint lives under `/seminars/{seminar_id}/evaluations/analytics` and
//! is wired up (admin-guarded) by the seminars module.
//!
//! ## Structure
//! - `get.rs` — pending evaluations, analytics
//! - `post.rs` — submission (gated on attendance, triggers the certificate)

pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use common::state::AppState;

use get::available_evaluations;
use post::submit_evaluation;

/// Builds the `/evaluations` route group.
///
/// - `GET /evaluations/available` → `available_evaluations`
/// - `POST /evaluations` → `submit_evaluation`
pub fn evaluations_routes() -> Router<AppState> {
    Router::new()
        .route("/available", get(available_evaluations))
        .route("/", post(submit_evaluation))
}
