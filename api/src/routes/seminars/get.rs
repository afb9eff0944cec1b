use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;

use common::state::AppState;
use db::models::seminar::{Column as SeminarColumn, Entity as SeminarEntity, Model as SeminarModel};

use crate::response::ApiResponse;
use crate::routes::common::SeminarResponse;

#[derive(Debug, Deserialize)]
pub struct ListSeminarsQuery {
    pub category_id: Option<i64>,
    pub is_done: Option<bool>,
}

/// GET /seminars
///
/// Public seminar listing, newest start date first. Before listing, any
/// seminar whose end date has passed is flipped to done and its planned
/// bookmarks are removed, so stale entries never surface as upcoming.
///
/// ### Query Parameters
/// - `category_id` (optional): only seminars in this category
/// - `is_done` (optional): filter on completion state
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "title": "Intro to Research Writing",
///       "description": "...",
///       "speaker": "Dr. A. Mokoena",
///       "venue": "Main Hall",
///       "date_start": "2026-06-01T09:00:00Z",
///       "date_end": "2026-06-01T11:00:00Z",
///       "duration_minutes": 120,
///       "is_done": false,
///       "category_id": 2,
///       "created_at": "2026-05-20T08:00:00Z",
///       "updated_at": "2026-05-20T08:00:00Z"
///     }
///   ],
///   "message": "Seminars retrieved successfully"
/// }
/// ```
pub async fn list_seminars(
    State(app_state): State<AppState>,
    Query(query): Query<ListSeminarsQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = SeminarModel::sweep_overdue(db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<SeminarResponse>>::error(format!(
                "Database error: {e}"
            ))),
        );
    }

    let mut condition = Condition::all();
    if let Some(category_id) = query.category_id {
        condition = condition.add(SeminarColumn::CategoryId.eq(category_id));
    }
    if let Some(is_done) = query.is_done {
        condition = condition.add(SeminarColumn::IsDone.eq(is_done));
    }

    match SeminarEntity::find()
        .filter(condition)
        .order_by_desc(SeminarColumn::DateStart)
        .all(db)
        .await
    {
        Ok(seminars) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                seminars
                    .into_iter()
                    .map(SeminarResponse::from)
                    .collect::<Vec<_>>(),
                "Seminars retrieved successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<SeminarResponse>>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

/// GET /seminars/{seminar_id}
///
/// Single seminar by ID.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
pub async fn get_seminar(
    State(app_state): State<AppState>,
    Path(seminar_id): Path<i64>,
) -> impl IntoResponse {
    match SeminarModel::find_by_id(app_state.db(), seminar_id).await {
        Ok(Some(seminar)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SeminarResponse::from(seminar),
                "Seminar retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<SeminarResponse>::error("Seminar not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SeminarResponse>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}
