use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use common::state::AppState;
use db::models::attendance::{Model as AttendanceModel, ScanAction, ScanError};
use db::models::seminar::Model as SeminarModel;
use db::models::seminar_qr_code::Model as SeminarQrCode;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::services::qr;

#[derive(Debug, Serialize)]
pub struct QrActionInfo {
    pub action: String,
    pub token: String,
    pub scan_url: String,
    /// Base64 `data:image/png` URL of the rendered QR code.
    pub qr_image: String,
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct QrPairResponse {
    pub check_in: QrActionInfo,
    pub check_out: QrActionInfo,
}

fn action_info(seminar_id: i64, code: &SeminarQrCode, action: ScanAction) -> Result<QrActionInfo, String> {
    let token = code.token_for(action).to_owned();
    let scan_url = qr::scan_url(action, seminar_id, &token);
    let qr_image = qr::qr_data_url(&scan_url, None).map_err(|e| e.to_string())?;

    Ok(QrActionInfo {
        action: action.as_str().to_owned(),
        token,
        scan_url,
        qr_image,
        download_url: format!(
            "/api/seminars/{}/attendance/qr/{}/download",
            seminar_id,
            action.as_str()
        ),
    })
}

/// POST /seminars/{seminar_id}/attendance/qr
///
/// Get-or-create the seminar's QR token pair. Tokens are UUIDs generated
/// once per seminar; calling this again returns the same pair. For each
/// action the response carries the raw token, the scan URL it encodes, an
/// inline base64 PNG of the QR code, and the download endpoint.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "check_in": {
///       "action": "check_in",
///       "token": "7f6e9a3c-...",
///       "scan_url": "https://app.example.com/attendance?action=check_in&seminar=1&token=7f6e9a3c-...",
///       "qr_image": "data:image/png;base64,...",
///       "download_url": "/api/seminars/1/attendance/qr/check_in/download"
///     },
///     "check_out": { "...": "..." }
///   },
///   "message": "QR codes retrieved successfully"
/// }
/// ```
///
/// - `404 Not Found` — unknown seminar
pub async fn issue_qr(
    State(app_state): State<AppState>,
    Path(seminar_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SeminarModel::find_by_id(db, seminar_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<QrPairResponse>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QrPairResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    let code = match SeminarQrCode::get_or_create(db, seminar_id).await {
        Ok(code) => code,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QrPairResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    let pair = action_info(seminar_id, &code, ScanAction::CheckIn).and_then(|check_in| {
        action_info(seminar_id, &code, ScanAction::CheckOut).map(|check_out| QrPairResponse {
            check_in,
            check_out,
        })
    });

    match pair {
        Ok(pair) => (
            StatusCode::OK,
            Json(ApiResponse::success(pair, "QR codes retrieved successfully")),
        ),
        Err(e) => {
            error!(seminar = seminar_id, "Failed to render QR code: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QrPairResponse>::error(
                    "Failed to render QR code",
                )),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub qr_token: String,
}

/// POST /seminars/{seminar_id}/attendance/{action}
///
/// Record a check-in or check-out scan for the caller. `action` must be
/// `check_in` or `check_out`. Scans are rejected once the seminar's end date
/// plus a 75 minute grace window has passed, when the presented token does
/// not match the stored one for that action, or when the matching timestamp
/// is already set. `is_present` is recomputed on every accepted scan.
///
/// ### Request Body
/// ```json
/// { "qr_token": "7f6e9a3c-..." }
/// ```
///
/// ### Responses
/// - `200 OK` — the updated attendance row
/// - `400 Bad Request` — bad action, closed window, wrong token, or repeat scan
/// - `404 Not Found` — unknown seminar
pub async fn record_scan(
    State(app_state): State<AppState>,
    Path((seminar_id, action)): Path<(i64, String)>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ScanRequest>,
) -> impl IntoResponse {
    let action = match ScanAction::parse(&action) {
        Some(action) => action,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<AttendanceModel>::error(
                    "Action must be 'check_in' or 'check_out'",
                )),
            );
        }
    };

    let db = app_state.db();

    let seminar = match SeminarModel::find_by_id(db, seminar_id).await {
        Ok(Some(seminar)) => seminar,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AttendanceModel>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AttendanceModel>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    let now = Utc::now();
    if !AttendanceModel::scan_window_open(seminar.date_end, now) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AttendanceModel>::error(
                "Attendance for this seminar has closed",
            )),
        );
    }

    let code = match SeminarQrCode::find_for_seminar(db, seminar_id).await {
        Ok(Some(code)) => code,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<AttendanceModel>::error("Invalid QR token")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AttendanceModel>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    if code.token_for(action) != req.qr_token {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AttendanceModel>::error("Invalid QR token")),
        );
    }

    let attendance = match AttendanceModel::get_or_create(db, claims.sub, seminar_id).await {
        Ok(attendance) => attendance,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AttendanceModel>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    match attendance.apply_scan(db, action, now).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(updated, "Attendance recorded")),
        ),
        Err(ScanError::AlreadyCheckedIn) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AttendanceModel>::error("Already checked in")),
        ),
        Err(ScanError::AlreadyCheckedOut) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AttendanceModel>::error("Already checked out")),
        ),
        Err(ScanError::Db(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AttendanceModel>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}
