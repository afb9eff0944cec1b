//! # seminars Routes Module
//!
//! Routes for the `/seminars` endpoint group, including the nested
//! attendance endpoints and the admin evaluation analytics.
//!
//! ## Structure
//! - `get.rs` — public listing and single-seminar fetch
//! - `post.rs` — seminar creation (admin)
//! - `put.rs` — partial updates (admin)
//! - `delete.rs` — deletion (admin)
//! - `attendance/` — QR issuance and scan endpoints

pub mod attendance;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use common::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::routes::evaluations::get::evaluation_analytics;
use attendance::get::{download_qr, present_participants};
use attendance::post::{issue_qr, record_scan};
use delete::delete_seminar;
use get::{get_seminar, list_seminars};
use post::create_seminar;
use put::update_seminar;

/// Builds the `/seminars` route group.
///
/// - `GET /seminars` → `list_seminars` (public)
/// - `GET /seminars/{seminar_id}` → `get_seminar` (public)
/// - `POST /seminars` → `create_seminar` (admin)
/// - `PUT /seminars/{seminar_id}` → `update_seminar` (admin)
/// - `DELETE /seminars/{seminar_id}` → `delete_seminar` (admin)
/// - `POST /seminars/{seminar_id}/attendance/qr` → `issue_qr` (admin)
/// - `GET /seminars/{seminar_id}/attendance/qr/{action}/download` → `download_qr` (admin)
/// - `GET /seminars/{seminar_id}/attendance/present` → `present_participants` (admin)
/// - `POST /seminars/{seminar_id}/attendance/{action}` → `record_scan` (authenticated)
/// - `GET /seminars/{seminar_id}/evaluations/analytics` → `evaluation_analytics` (admin)
pub fn seminars_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_seminar))
        .route("/{seminar_id}", put(update_seminar).delete(delete_seminar))
        .route("/{seminar_id}/attendance/qr", post(issue_qr))
        .route(
            "/{seminar_id}/attendance/qr/{action}/download",
            get(download_qr),
        )
        .route("/{seminar_id}/attendance/present", get(present_participants))
        .route(
            "/{seminar_id}/evaluations/analytics",
            get(evaluation_analytics),
        )
        .route_layer(from_fn(allow_admin));

    let authenticated = Router::new()
        .route("/{seminar_id}/attendance/{action}", post(record_scan))
        .route_layer(from_fn(allow_authenticated));

    Router::new()
        .route("/", get(list_seminars))
        .route("/{seminar_id}", get(get_seminar))
        .merge(admin)
        .merge(authenticated)
}
