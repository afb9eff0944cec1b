//! `/planned-seminars` route group: the caller's "planning to attend"
//! bookmarks. Authenticated.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};

use common::state::AppState;
use db::models::planned_seminar::{
    self, Column as PlannedColumn, Entity as PlannedEntity, Model as PlannedModel,
};
use db::models::seminar::Model as SeminarModel;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::SeminarResponse;

/// Builds the `/planned-seminars` route group.
///
/// - `GET /planned-seminars` → `list_planned`
/// - `POST /planned-seminars` → `create_planned`
/// - `DELETE /planned-seminars/{planned_id}` → `delete_planned`
pub fn planned_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_planned))
        .route("/", post(create_planned))
        .route("/{planned_id}", delete(delete_planned))
}

#[derive(Debug, Serialize)]
pub struct PlannedResponse {
    pub id: i64,
    pub seminar_id: i64,
    pub created_at: String,
    pub seminar: Option<SeminarResponse>,
}

/// GET /planned-seminars
///
/// The caller's bookmarks, newest first, each with the seminar embedded.
pub async fn list_planned(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    match PlannedEntity::find()
        .filter(PlannedColumn::UserId.eq(claims.sub))
        .order_by_desc(PlannedColumn::CreatedAt)
        .find_also_related(db::models::seminar::Entity)
        .all(app_state.db())
        .await
    {
        Ok(rows) => {
            let planned = rows
                .into_iter()
                .map(|(row, seminar)| PlannedResponse {
                    id: row.id,
                    seminar_id: row.seminar_id,
                    created_at: row.created_at.to_rfc3339(),
                    seminar: seminar.map(SeminarResponse::from),
                })
                .collect::<Vec<_>>();

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    planned,
                    "Planned seminars retrieved successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<PlannedResponse>>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePlannedRequest {
    pub seminar_id: i64,
}

/// POST /planned-seminars
///
/// Bookmark a seminar.
///
/// ### Responses
/// - `201 Created`
/// - `404 Not Found` — unknown seminar
/// - `409 Conflict` — already planned
pub async fn create_planned(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreatePlannedRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SeminarModel::find_by_id(db, req.seminar_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<PlannedModel>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<PlannedModel>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    match PlannedModel::find_for_user_and_seminar(db, claims.sub, req.seminar_id).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<PlannedModel>::error(
                    "Seminar is already planned",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<PlannedModel>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
        _ => {}
    }

    let active = planned_seminar::ActiveModel {
        user_id: Set(claims.sub),
        seminar_id: Set(req.seminar_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match active.insert(db).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "Seminar planned successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<PlannedModel>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

/// DELETE /planned-seminars/{planned_id}
///
/// Remove one of the caller's bookmarks. Rows belonging to other users are
/// reported as missing rather than forbidden.
pub async fn delete_planned(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(planned_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let planned = match PlannedEntity::find_by_id(planned_id).one(db).await {
        Ok(Some(planned)) if planned.user_id == claims.sub => planned,
        Ok(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Planned seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    match planned.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Planned seminar removed")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        ),
    }
}
