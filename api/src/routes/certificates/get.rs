use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use common::{config, state::AppState};
use db::models::certificate_template::{self, Model as CertificateTemplate};
use db::models::seminar::Model as SeminarModel;

use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct DefaultTemplateResponse {
    pub template_url: String,
    pub template_width: i32,
    pub template_height: i32,
    pub name_x_percent: f32,
    pub name_y_percent: f32,
    pub name_font_size: i32,
    pub name_font: String,
    pub name_color: String,
    pub title_x_percent: f32,
    pub title_y_percent: f32,
    pub title_font_size: i32,
    pub title_font: String,
    pub title_color: String,
}

/// GET /certificates/templates/default
///
/// The stock template configuration used when a seminar has no template of
/// its own, plus the configured background URL. Public so the frontend can
/// render a preview.
pub async fn get_default_template() -> impl IntoResponse {
    let defaults = CertificateTemplate::default_for_seminar(0);

    Json(ApiResponse::success(
        DefaultTemplateResponse {
            template_url: config::default_certificate_template_url(),
            template_width: defaults.template_width,
            template_height: defaults.template_height,
            name_x_percent: defaults.name_x_percent,
            name_y_percent: defaults.name_y_percent,
            name_font_size: defaults.name_font_size,
            name_font: defaults.name_font,
            name_color: defaults.name_color,
            title_x_percent: defaults.title_x_percent,
            title_y_percent: defaults.title_y_percent,
            title_font_size: defaults.title_font_size,
            title_font: defaults.title_font,
            title_color: defaults.title_color,
        },
        "Default template retrieved successfully",
    ))
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    pub seminar_id: i64,
}

/// GET /certificates/templates?seminar_id=
///
/// The seminar's stored template, or the default configuration (with
/// `default_used = true`) when none has been uploaded.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` — unknown seminar
pub async fn get_template(
    State(app_state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SeminarModel::find_by_id(db, query.seminar_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<certificate_template::Model>::error(
                    "Seminar not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<certificate_template::Model>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    match CertificateTemplate::find_for_seminar(db, query.seminar_id).await {
        Ok(Some(template)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                template,
                "Template retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CertificateTemplate::default_for_seminar(query.seminar_id),
                "No template uploaded; returning defaults",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<certificate_template::Model>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}
