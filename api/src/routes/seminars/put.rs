use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;

use common::state::AppState;
use db::models::category::Entity as CategoryEntity;
use db::models::seminar::{self, Model as SeminarModel};

use crate::response::ApiResponse;
use crate::routes::common::SeminarResponse;

#[derive(Debug, Deserialize)]
pub struct UpdateSeminarRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub speaker: Option<String>,
    pub venue: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub is_done: Option<bool>,
    pub category_id: Option<i64>,
}

/// PUT /seminars/{seminar_id}
///
/// Partial update. The date ordering check runs against the final values
/// (new where provided, stored otherwise). Setting `is_done = true` also
/// deletes every planned bookmark for the seminar.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` — `date_end` not after `date_start`
/// - `404 Not Found` — unknown seminar or `category_id`
pub async fn update_seminar(
    State(app_state): State<AppState>,
    Path(seminar_id): Path<i64>,
    Json(req): Json<UpdateSeminarRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let seminar = match SeminarModel::find_by_id(db, seminar_id).await {
        Ok(Some(seminar)) => seminar,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SeminarResponse>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SeminarResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    let date_start = req.date_start.unwrap_or(seminar.date_start);
    let date_end = req.date_end.unwrap_or(seminar.date_end);
    if date_end <= date_start {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SeminarResponse>::error(
                "date_end must be after date_start",
            )),
        );
    }

    if let Some(category_id) = req.category_id {
        match CategoryEntity::find_by_id(category_id).one(db).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<SeminarResponse>::error("Category not found")),
                );
            }
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<SeminarResponse>::error(format!(
                        "Database error: {e}"
                    ))),
                );
            }
        }
    }

    let marking_done = req.is_done == Some(true) && !seminar.is_done;

    let mut active: seminar::ActiveModel = seminar.into();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(description);
    }
    if let Some(speaker) = req.speaker {
        active.speaker = Set(speaker);
    }
    if let Some(venue) = req.venue {
        active.venue = Set(venue);
    }
    active.date_start = Set(date_start);
    active.date_end = Set(date_end);
    if let Some(duration_minutes) = req.duration_minutes {
        active.duration_minutes = Set(Some(duration_minutes));
    }
    if let Some(is_done) = req.is_done {
        active.is_done = Set(is_done);
    }
    if let Some(category_id) = req.category_id {
        active.category_id = Set(Some(category_id));
    }
    active.updated_at = Set(Utc::now());

    let updated = match active.update(db).await {
        Ok(updated) => updated,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SeminarResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    if marking_done {
        if let Err(e) = SeminarModel::clear_planned(db, updated.id).await {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SeminarResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            SeminarResponse::from(updated),
            "Seminar updated successfully",
        )),
    )
}
