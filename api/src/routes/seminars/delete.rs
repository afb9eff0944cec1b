use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{EntityTrait, ModelTrait};

use common::state::AppState;
use db::models::seminar::Entity as SeminarEntity;

use crate::response::ApiResponse;

/// DELETE /seminars/{seminar_id}
///
/// Delete a seminar. Attendance rows, QR tokens, evaluations, the
/// certificate template and planned bookmarks cascade at the database level.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
pub async fn delete_seminar(
    State(app_state): State<AppState>,
    Path(seminar_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let seminar = match SeminarEntity::find_by_id(seminar_id).one(db).await {
        Ok(Some(seminar)) => seminar,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    match seminar.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Seminar deleted successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        ),
    }
}
