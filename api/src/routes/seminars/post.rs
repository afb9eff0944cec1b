use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use common::{format_validation_errors, state::AppState};
use db::models::category::Entity as CategoryEntity;
use db::models::seminar::{self, Model as SeminarModel};
use db::models::user::Model as UserModel;

use crate::response::ApiResponse;
use crate::routes::common::SeminarResponse;
use crate::services::email::EmailService;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSeminarRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub description: String,

    #[validate(length(min = 1, message = "Speaker is required"))]
    pub speaker: String,

    #[validate(length(min = 1, message = "Venue is required"))]
    pub venue: String,

    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_minutes: Option<i32>,

    pub category_id: Option<i64>,
}

/// POST /seminars
///
/// Create a seminar. After a successful insert a background task emails a
/// "new seminar" announcement to every verified, opted-in participant; a
/// failure for one recipient is logged and the rest still go out.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Intro to Research Writing",
///   "description": "Hands-on workshop",
///   "speaker": "Dr. A. Mokoena",
///   "venue": "Main Hall",
///   "date_start": "2026-06-01T09:00:00Z",
///   "date_end": "2026-06-01T11:00:00Z",
///   "duration_minutes": 120,
///   "category_id": 2
/// }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` — validation failure, or `date_end` not after `date_start`
/// - `404 Not Found` — unknown `category_id`
pub async fn create_seminar(
    State(app_state): State<AppState>,
    Json(req): Json<CreateSeminarRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SeminarResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    if req.date_end <= req.date_start {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SeminarResponse>::error(
                "date_end must be after date_start",
            )),
        );
    }

    let db = app_state.db();

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

    let now = Utc::now();
    let active = seminar::ActiveModel {
        title: Set(req.title),
        description: Set(req.description),
        speaker: Set(req.speaker),
        venue: Set(req.venue),
        date_start: Set(req.date_start),
        date_end: Set(req.date_end),
        duration_minutes: Set(req.duration_minutes),
        is_done: Set(false),
        category_id: Set(req.category_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = match active.insert(db).await {
        Ok(created) => created,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SeminarResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    notify_participants(app_state.db_clone(), created.clone());

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            SeminarResponse::from(created),
            "Seminar created successfully",
        )),
    )
}

/// Fans the announcement out to every eligible recipient on a background
/// task so the create request returns immediately.
fn notify_participants(db: sea_orm::DatabaseConnection, seminar: SeminarModel) {
    tokio::spawn(async move {
        let recipients = match UserModel::notification_recipients(&db).await {
            Ok(recipients) => recipients,
            Err(e) => {
                warn!(seminar = seminar.id, "Failed to load notification recipients: {e}");
                return;
            }
        };

        let total = recipients.len();
        for user in recipients {
            if let Err(e) =
                EmailService::send_new_seminar_notification(&user.email, &user.full_name(), &seminar)
                    .await
            {
                warn!(
                    user = user.id,
                    seminar = seminar.id,
                    "Failed to send seminar notification: {e}"
                );
            }
        }
        info!(seminar = seminar.id, recipients = total, "Seminar notifications dispatched");
    });
}
