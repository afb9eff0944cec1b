//! # Users Routes Module
//!
//! Defines and wires up routes for the `/api/users` endpoint group. The whole
//! group sits behind the `allow_admin` guard.
//!
//! ## Structure
//! - `get.rs` — GET handlers (list users, single user)
//! - `put.rs` — PUT handlers (update role / flags)
//! - `delete.rs` — DELETE handlers

use axum::{
    Router,
    routing::{delete, get, put},
};
use common::state::AppState;

use delete::delete_user;
use get::{get_user, list_users};
use put::update_user;

pub mod delete;
pub mod get;
pub mod put;

/// Builds the `/users` route group, mapping HTTP methods to handlers.
///
/// - `GET /users` → `list_users`
/// - `GET /users/{user_id}` → `get_user`
/// - `PUT /users/{user_id}` → `update_user`
/// - `DELETE /users/{user_id}` → `delete_user`
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{user_id}", get(get_user))
        .route("/{user_id}", put(update_user))
        .route("/{user_id}", delete(delete_user))
}
