use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{Response, StatusCode, header},
    response::IntoResponse,
};
use tracing::error;

use common::state::AppState;
use db::models::attendance::{Model as AttendanceModel, ScanAction};
use db::models::seminar::Model as SeminarModel;
use db::models::seminar_qr_code::Model as SeminarQrCode;

use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use crate::services::qr;

/// GET /seminars/{seminar_id}/attendance/qr/{action}/download
///
/// The QR code for one action as a PNG attachment, with a
/// `{title}_{action}` label strip rendered under the code. The label is
/// omitted when the label font cannot be loaded.
///
/// ### Responses
/// - `200 OK` — `image/png` body with `Content-Disposition: attachment`
/// - `400 Bad Request` — bad action
/// - `404 Not Found` — unknown seminar
pub async fn download_qr(
    State(app_state): State<AppState>,
    Path((seminar_id, action)): Path<(i64, String)>,
) -> Response<Body> {
    let action = match ScanAction::parse(&action) {
        Some(action) => action,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    "Action must be 'check_in' or 'check_out'",
                )),
            )
                .into_response();
        }
    };

    let db = app_state.db();

    let seminar = match SeminarModel::find_by_id(db, seminar_id).await {
        Ok(Some(seminar)) => seminar,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Seminar not found")),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            )
                .into_response();
        }
    };

    let code = match SeminarQrCode::get_or_create(db, seminar_id).await {
        Ok(code) => code,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            )
                .into_response();
        }
    };

    let label = format!("{}_{}", seminar.title, action.as_str());
    let scan_url = qr::scan_url(action, seminar_id, code.token_for(action));

    let png = match qr::qr_png_bytes(&scan_url, Some(&label)) {
        Ok(png) => png,
        Err(e) => {
            error!(seminar = seminar_id, "Failed to render QR code: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to render QR code")),
            )
                .into_response();
        }
    };

    let filename = format!("{}.png", label.replace(' ', "_"));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        png,
    )
        .into_response()
}

/// GET /seminars/{seminar_id}/attendance/present
///
/// Participants (admin accounts excluded) with a fully recorded attendance,
/// i.e. both check-in and check-out scans.
///
/// ### Responses
/// - `200 OK` — list of users
/// - `404 Not Found` — unknown seminar
pub async fn present_participants(
    State(app_state): State<AppState>,
    Path(seminar_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SeminarModel::find_by_id(db, seminar_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<UserResponse>>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<UserResponse>>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    match AttendanceModel::present_participants(db, seminar_id).await {
        Ok(users) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
                "Present participants retrieved successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<UserResponse>>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}
