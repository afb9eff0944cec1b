use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use common::state::AppState;
use db::models::attendance::Model as AttendanceModel;
use db::models::evaluation::Model as EvaluationModel;
use db::models::seminar::Model as SeminarModel;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::SeminarResponse;

#[derive(Debug, Serialize)]
pub struct AvailableEvaluation {
    pub seminar: SeminarResponse,
    /// A draft row when the user saved one, for pre-filling the form.
    pub draft: Option<EvaluationModel>,
}

/// GET /evaluations/available
///
/// The evaluations the caller still owes: one entry per seminar they were
/// fully present at and have not completed an evaluation for. A saved draft
/// is embedded so the frontend can pre-fill the form.
pub async fn available_evaluations(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    let attendances = match AttendanceModel::present_for_user(db, claims.sub).await {
        Ok(attendances) => attendances,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<AvailableEvaluation>>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    let mut available = Vec::new();
    for attendance in attendances {
        let existing =
            match EvaluationModel::find_for_user_and_seminar(db, claims.sub, attendance.seminar_id)
                .await
            {
                Ok(existing) => existing,
                Err(e) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<Vec<AvailableEvaluation>>::error(format!(
                            "Database error: {e}"
                        ))),
                    );
                }
            };

        if existing.as_ref().is_some_and(|e| e.is_completed) {
            continue;
        }

        match SeminarModel::find_by_id(db, attendance.seminar_id).await {
            Ok(Some(seminar)) => available.push(AvailableEvaluation {
                seminar: SeminarResponse::from(seminar),
                draft: existing,
            }),
            Ok(None) => {}
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<Vec<AvailableEvaluation>>::error(format!(
                        "Database error: {e}"
                    ))),
                );
            }
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            available,
            "Available evaluations retrieved successfully",
        )),
    )
}

#[derive(Debug, Serialize, Default)]
pub struct RatingAverages {
    pub content_and_relevance: f64,
    pub presenters_effectiveness: f64,
    pub organization_and_structure: f64,
    pub materials_usefulness: f64,
    pub overall_satisfaction: f64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub total_responses: u64,
    pub averages: RatingAverages,
    pub evaluations: Vec<EvaluationModel>,
}

/// GET /seminars/{seminar_id}/evaluations/analytics
///
/// Admin view over a seminar's completed evaluations: the raw rows, the
/// response count, and a per-category average.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` — unknown seminar
pub async fn evaluation_analytics(
    State(app_state): State<AppState>,
    Path(seminar_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SeminarModel::find_by_id(db, seminar_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AnalyticsResponse>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AnalyticsResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    let evaluations = match EvaluationModel::completed_for_seminar(db, seminar_id).await {
        Ok(evaluations) => evaluations,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AnalyticsResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    let total = evaluations.len() as u64;
    let averages = if total == 0 {
        RatingAverages::default()
    } else {
        let mut sums = [0i64; 5];
        for evaluation in &evaluations {
            for (sum, rating) in sums.iter_mut().zip(evaluation.ratings()) {
                *sum += rating as i64;
            }
        }
        let avg = |sum: i64| sum as f64 / total as f64;
        RatingAverages {
            content_and_relevance: avg(sums[0]),
            presenters_effectiveness: avg(sums[1]),
            organization_and_structure: avg(sums[2]),
            materials_usefulness: avg(sums[3]),
            overall_satisfaction: avg(sums[4]),
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            AnalyticsResponse {
                total_responses: total,
                averages,
                evaluations,
            },
            "Evaluation analytics retrieved successfully",
        )),
    )
}
