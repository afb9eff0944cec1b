use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde::{Deserialize, Serialize};
use tracing::error;
use validator::Validate;

use common::{format_validation_errors, state::AppState};
use db::models::attendance::Model as AttendanceModel;
use db::models::evaluation::{self, Model as EvaluationModel};
use db::models::planned_seminar::Model as PlannedModel;
use db::models::seminar::Model as SeminarModel;
use db::models::user::Model as UserModel;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::services::certificate;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitEvaluationRequest {
    pub seminar_id: i64,

    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub content_and_relevance: i16,
    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub presenters_effectiveness: i16,
    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub organization_and_structure: i16,
    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub materials_usefulness: i16,
    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub overall_satisfaction: i16,

    #[serde(default)]
    pub suggestions: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitEvaluationResponse {
    pub evaluation: EvaluationModel,
    /// Base64 PNG data URL of the generated certificate, when rendering
    /// succeeded.
    pub certificate_url: Option<String>,
}

/// POST /evaluations
///
/// Submit the evaluation for an attended seminar. Only callers with a fully
/// recorded attendance (`is_present`) may submit; a completed evaluation is
/// immutable, while an earlier draft is overwritten. On success the planned
/// bookmark for the seminar (if any) is removed and the certificate is
/// generated and emailed; the response carries the evaluation and the
/// certificate as a data URL. A certificate failure is logged and leaves
/// `certificate_url` null rather than failing the submission.
///
/// ### Request Body
/// ```json
/// {
///   "seminar_id": 1,
///   "content_and_relevance": 5,
///   "presenters_effectiveness": 4,
///   "organization_and_structure": 5,
///   "materials_usefulness": 4,
///   "overall_satisfaction": 5,
///   "suggestions": "More time for questions"
/// }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` — rating out of range
/// - `403 Forbidden` — no `is_present` attendance for the seminar
/// - `404 Not Found` — unknown seminar
/// - `409 Conflict` — evaluation already completed
pub async fn submit_evaluation(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SubmitEvaluationRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmitEvaluationResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    let seminar = match SeminarModel::find_by_id(db, req.seminar_id).await {
        Ok(Some(seminar)) => seminar,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SubmitEvaluationResponse>::error(
                    "Seminar not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmitEvaluationResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    let attended = AttendanceModel::find_for_user_and_seminar(db, claims.sub, req.seminar_id)
        .await
        .map(|a| a.map(|a| a.is_present).unwrap_or(false));
    match attended {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::<SubmitEvaluationResponse>::error(
                    "You can only evaluate seminars you attended",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmitEvaluationResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    let existing = match EvaluationModel::find_for_user_and_seminar(db, claims.sub, req.seminar_id)
        .await
    {
        Ok(existing) => existing,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmitEvaluationResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    if existing.as_ref().is_some_and(|e| e.is_completed) {
        return (
            StatusCode::CONFLICT,
            Json(ApiResponse::<SubmitEvaluationResponse>::error(
                "Evaluation already submitted",
            )),
        );
    }

    let mut active = match existing {
        Some(draft) => evaluation::ActiveModel::from(draft),
        None => evaluation::ActiveModel {
            user_id: Set(claims.sub),
            seminar_id: Set(req.seminar_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        },
    };
    active.content_and_relevance = Set(req.content_and_relevance);
    active.presenters_effectiveness = Set(req.presenters_effectiveness);
    active.organization_and_structure = Set(req.organization_and_structure);
    active.materials_usefulness = Set(req.materials_usefulness);
    active.overall_satisfaction = Set(req.overall_satisfaction);
    active.suggestions = Set(req.suggestions);
    active.is_completed = Set(true);

    let is_update = matches!(active.id, sea_orm::ActiveValue::Unchanged(_));
    let saved = if is_update {
        active.update(db).await
    } else {
        active.insert(db).await
    };
    let evaluation = match saved {
        Ok(evaluation) => evaluation,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmitEvaluationResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    if let Err(e) = PlannedModel::delete_for_user_and_seminar(db, claims.sub, req.seminar_id).await
    {
        error!(user = claims.sub, seminar = req.seminar_id, "Failed to clear planned bookmark: {e}");
    }

    let certificate_url = match UserModel::find_by_id(db, claims.sub).await {
        Ok(Some(user)) => match certificate::generate_and_send(db, &seminar, &user).await {
            Ok(url) => Some(url),
            Err(e) => {
                error!(
                    user = claims.sub,
                    seminar = req.seminar_id,
                    "Failed to generate certificate: {e}"
                );
                None
            }
        },
        _ => None,
    };

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            SubmitEvaluationResponse {
                evaluation,
                certificate_url,
            },
            "Evaluation submitted successfully",
        )),
    )
}
