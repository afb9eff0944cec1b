//! `/categories` route group. Listing is public; mutations are admin-only.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post, put},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use serde::Deserialize;
use validator::Validate;

use common::{format_validation_errors, state::AppState};
use db::models::category::{self, Column as CategoryColumn, Entity as CategoryEntity};

use crate::auth::guards::allow_admin;
use crate::response::ApiResponse;

/// Builds the `/categories` route group.
///
/// - `GET /categories` → `list_categories` (public)
/// - `POST /categories` → `create_category` (admin)
/// - `PUT /categories/{category_id}` → `update_category` (admin)
/// - `DELETE /categories/{category_id}` → `delete_category` (admin)
pub fn categories_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_category))
        .route(
            "/{category_id}",
            put(update_category).delete(delete_category),
        )
        .route_layer(from_fn(allow_admin));

    Router::new().route("/", get(list_categories)).merge(admin)
}

/// GET /categories
///
/// Public list of seminar categories, alphabetical.
pub async fn list_categories(State(app_state): State<AppState>) -> impl IntoResponse {
    match CategoryEntity::find()
        .order_by_asc(CategoryColumn::Name)
        .all(app_state.db())
        .await
    {
        Ok(categories) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                categories,
                "Categories retrieved successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<category::Model>>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// POST /categories
///
/// Create a category. Names are unique.
///
/// ### Responses
/// - `201 Created`
/// - `409 Conflict` — duplicate name
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(req): Json<CategoryRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<category::Model>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    match CategoryEntity::find()
        .filter(CategoryColumn::Name.eq(&req.name))
        .one(db)
        .await
    {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<category::Model>::error(
                    "A category with this name already exists",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<category::Model>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
        _ => {}
    }

    let active = category::ActiveModel {
        name: Set(req.name),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match active.insert(db).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "Category created successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<category::Model>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

/// PUT /categories/{category_id}
///
/// Rename a category.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
/// - `409 Conflict` — the new name is taken
pub async fn update_category(
    State(app_state): State<AppState>,
    Path(category_id): Path<i64>,
    Json(req): Json<CategoryRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<category::Model>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    let existing = match CategoryEntity::find_by_id(category_id).one(db).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<category::Model>::error("Category not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<category::Model>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    match CategoryEntity::find()
        .filter(CategoryColumn::Name.eq(&req.name))
        .filter(CategoryColumn::Id.ne(category_id))
        .one(db)
        .await
    {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<category::Model>::error(
                    "A category with this name already exists",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<category::Model>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
        _ => {}
    }

    let mut active: category::ActiveModel = existing.into();
    active.name = Set(req.name);

    match active.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(updated, "Category updated successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<category::Model>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

/// DELETE /categories/{category_id}
///
/// Delete a category. Seminars keep running with their `category_id` nulled
/// by the FK's set-null rule.
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let category = match CategoryEntity::find_by_id(category_id).one(db).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Category not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    match category.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Category deleted successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        ),
    }
}
