use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use common::state::AppState;
use db::models::certificate_record::Model as CertificateRecord;
use db::models::user::Model as UserModel;
use db::models::{attendance, evaluation, planned_seminar};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{SeminarResponse, UserResponse};

/// GET /me
///
/// The authenticated caller's own profile.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "jdoe",
///     "email": "user@example.com",
///     "first_name": "Jane",
///     "last_name": "Doe",
///     "role": "participant",
///     "is_email_verified": true,
///     "email_notifications": true,
///     "created_at": "2026-05-23T18:00:00Z",
///     "updated_at": "2026-05-23T18:00:00Z"
///   },
///   "message": "Profile retrieved successfully"
/// }
/// ```
///
/// - `404 Not Found` — the account behind the token no longer exists
pub async fn get_me(State(state): State<AppState>, AuthUser(claims): AuthUser) -> impl IntoResponse {
    match UserModel::find_by_id(state.db(), claims.sub).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "Profile retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<UserResponse>::error("User not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

#[derive(Debug, Serialize)]
pub struct PlannedEntry {
    pub id: i64,
    pub created_at: String,
    pub seminar: Option<SeminarResponse>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub planned_seminars: Vec<PlannedEntry>,
    pub attendances: Vec<attendance::Model>,
    pub evaluations: Vec<evaluation::Model>,
    pub certificates: Vec<CertificateRecord>,
}

/// GET /me/dashboard
///
/// Everything the frontend's home screen needs in one payload: the caller's
/// planned seminars (with the seminar embedded), attendance rows, evaluations
/// and certificate audit records.
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = state.db();
    let user_id = claims.sub;

    let planned = planned_seminar::Entity::find()
        .filter(planned_seminar::Column::UserId.eq(user_id))
        .find_also_related(db::models::seminar::Entity)
        .all(db)
        .await;
    let attendances = attendance::Entity::find()
        .filter(attendance::Column::UserId.eq(user_id))
        .all(db)
        .await;
    let evaluations = evaluation::Entity::find()
        .filter(evaluation::Column::UserId.eq(user_id))
        .all(db)
        .await;
    let certificates = CertificateRecord::for_user(db, user_id).await;

    match (planned, attendances, evaluations, certificates) {
        (Ok(planned), Ok(attendances), Ok(evaluations), Ok(certificates)) => {
            let planned_seminars = planned
                .into_iter()
                .map(|(row, seminar)| PlannedEntry {
                    id: row.id,
                    created_at: row.created_at.to_rfc3339(),
                    seminar: seminar.map(SeminarResponse::from),
                })
                .collect();

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    DashboardResponse {
                        planned_seminars,
                        attendances,
                        evaluations,
                        certificates,
                    },
                    "Dashboard retrieved successfully",
                )),
            )
        }
        (planned, attendances, evaluations, certificates) => {
            let e = [
                planned.err().map(|e| e.to_string()),
                attendances.err().map(|e| e.to_string()),
                evaluations.err().map(|e| e.to_string()),
                certificates.err().map(|e| e.to_string()),
            ]
            .into_iter()
            .flatten()
            .next()
            .unwrap_or_default();

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DashboardResponse>::error(format!(
                    "Database error: {e}"
                ))),
            )
        }
    }
}
