//! # certificates Routes Module
//!
//! Routes for the `/certificates` endpoint group: template management and
//! admin resending. The default-template config endpoint is public (the
//! frontend renders a live preview from it); everything else is admin-only.
//!
//! ## Structure
//! - `get.rs` — default config, per-seminar template lookup
//! - `post.rs` — multipart template upload, certificate resend
//! - `delete.rs` — template removal

pub mod delete;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use common::state::AppState;

use crate::auth::guards::allow_admin;
use delete::delete_template;
use get::{get_default_template, get_template};
use post::{resend_certificate, upsert_template};

/// Builds the `/certificates` route group.
///
/// - `GET /certificates/templates/default` → `get_default_template` (public)
/// - `GET /certificates/templates` → `get_template` (admin)
/// - `POST /certificates/templates` → `upsert_template` (admin, multipart)
/// - `DELETE /certificates/templates/{template_id}` → `delete_template` (admin)
/// - `POST /certificates/resend/{seminar_id}/{user_id}` → `resend_certificate` (admin)
pub fn certificates_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/templates", get(get_template).post(upsert_template))
        .route("/templates/{template_id}", delete(delete_template))
        .route("/resend/{seminar_id}/{user_id}", post(resend_certificate))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route("/templates/default", get(get_default_template))
        .merge(admin)
}
