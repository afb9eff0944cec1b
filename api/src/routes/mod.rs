//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain (authentication, seminars, evaluations,
//! certificates, ...), each protected via appropriate access control
//! middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration, login and token flows (public)
//! - `/me` → The caller's own account and dashboard (authenticated)
//! - `/users` → User administration (admin-only)
//! - `/categories` → Seminar categories (public reads, admin writes)
//! - `/seminars` → Seminar CRUD plus nested attendance endpoints
//! - `/planned-seminars` → The caller's bookmarks (authenticated)
//! - `/evaluations` → Post-attendance evaluations (authenticated)
//! - `/certificates` → Template management and resending

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::routes::{
    auth::auth_routes, categories::categories_routes, certificates::certificates_routes,
    evaluations::evaluations_routes, health::health_routes, me::me_routes,
    planned::planned_routes, seminars::seminars_routes, users::users_routes,
};
use ::common::state::AppState;
use axum::{Router, middleware::from_fn};

pub mod auth;
pub mod categories;
pub mod certificates;
pub mod common;
pub mod evaluations;
pub mod health;
pub mod me;
pub mod planned;
pub mod seminars;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router has `AppState` as its state type and mounts all core
/// API routes under their respective base paths. Guards that apply to a
/// whole group are layered here; groups with mixed access (seminars,
/// categories, certificates) compose their own guards internally.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/me", me_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest("/categories", categories_routes())
        .nest("/seminars", seminars_routes())
        .nest(
            "/planned-seminars",
            planned_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/evaluations",
            evaluations_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest("/certificates", certificates_routes())
        .with_state(app_state)
}
