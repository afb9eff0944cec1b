use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{EntityTrait, ModelTrait};
use tracing::warn;

use common::{paths, state::AppState};
use db::models::certificate_template::Entity as TemplateEntity;

use crate::response::ApiResponse;

/// DELETE /certificates/templates/{template_id}
///
/// Remove a seminar's certificate template. The stored media file is deleted
/// as well; the seminar falls back to the default template afterwards.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
pub async fn delete_template(
    State(app_state): State<AppState>,
    Path(template_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let template = match TemplateEntity::find_by_id(template_id).one(db).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Template not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
            );
        }
    };

    let image_path = template.image_path.clone();
    let seminar_id = template.seminar_id;

    if let Err(e) = template.delete(db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {e}"))),
        );
    }

    if let Some(relative) = image_path {
        let path = paths::media_root().join(relative);
        if let Err(e) = std::fs::remove_file(&path) {
            warn!(seminar = seminar_id, "Failed to remove template image: {e}");
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success((), "Template deleted successfully")),
    )
}
