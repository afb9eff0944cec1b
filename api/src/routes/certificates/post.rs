use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde::Serialize;
use tracing::{error, warn};

use common::{paths, state::AppState};
use db::models::certificate_template::{self, Model as CertificateTemplate};
use db::models::evaluation::Model as EvaluationModel;
use db::models::seminar::Model as SeminarModel;
use db::models::user::Model as UserModel;

use crate::response::ApiResponse;
use crate::services::certificate;

/// Parsed multipart form for `POST /certificates/templates`. Absent fields
/// keep the existing (or default) value.
#[derive(Default)]
struct TemplateForm {
    seminar_id: Option<i64>,
    image: Option<(String, Vec<u8>)>,
    name_x_percent: Option<f32>,
    name_y_percent: Option<f32>,
    name_font_size: Option<i32>,
    name_font: Option<String>,
    name_color: Option<String>,
    title_x_percent: Option<f32>,
    title_y_percent: Option<f32>,
    title_font_size: Option<i32>,
    title_font: Option<String>,
    title_color: Option<String>,
    show_title: Option<bool>,
}

async fn parse_form(mut multipart: Multipart) -> Result<TemplateForm, String> {
    let mut form = TemplateForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid multipart body: {e}"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let filename = field
                .file_name()
                .map(str::to_owned)
                .unwrap_or_else(|| "template.png".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| format!("Failed to read image upload: {e}"))?;
            form.image = Some((filename, bytes.to_vec()));
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| format!("Failed to read field '{name}': {e}"))?;

        macro_rules! parse {
            ($ty:ty) => {
                text.parse::<$ty>()
                    .map_err(|_| format!("Invalid value for '{name}'"))?
            };
        }

        match name.as_str() {
            "seminar_id" => form.seminar_id = Some(parse!(i64)),
            "name_x_percent" => form.name_x_percent = Some(parse!(f32)),
            "name_y_percent" => form.name_y_percent = Some(parse!(f32)),
            "name_font_size" => form.name_font_size = Some(parse!(i32)),
            "name_font" => form.name_font = Some(text),
            "name_color" => form.name_color = Some(text),
            "title_x_percent" => form.title_x_percent = Some(parse!(f32)),
            "title_y_percent" => form.title_y_percent = Some(parse!(f32)),
            "title_font_size" => form.title_font_size = Some(parse!(i32)),
            "title_font" => form.title_font = Some(text),
            "title_color" => form.title_color = Some(text),
            "show_title" => form.show_title = Some(parse!(bool)),
            _ => {}
        }
    }

    Ok(form)
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn validate_form(form: &TemplateForm) -> Result<(), &'static str> {
    let percent_ok = |v: Option<f32>| v.is_none_or(|v| (0.0..=100.0).contains(&v));
    let font_ok = |v: Option<i32>| v.is_none_or(|v| (10..=500).contains(&v));
    let color_ok = |v: &Option<String>| v.as_deref().is_none_or(is_hex_color);

    if !(percent_ok(form.name_x_percent)
        && percent_ok(form.name_y_percent)
        && percent_ok(form.title_x_percent)
        && percent_ok(form.title_y_percent))
    {
        return Err("Percentage fields must be between 0 and 100");
    }
    if !(font_ok(form.name_font_size) && font_ok(form.title_font_size)) {
        return Err("Font sizes must be between 10 and 500");
    }
    if !(color_ok(&form.name_color) && color_ok(&form.title_color)) {
        return Err("Colors must be in #rrggbb form");
    }
    Ok(())
}

/// POST /certificates/templates
///
/// Create-or-replace the certificate template for a seminar. Multipart form:
/// a `seminar_id` field, an optional `image` file part, and optional layout
/// fields (`name_x_percent`, `name_font_size`, `title_color`, `show_title`,
/// ...). An uploaded image is stored under the media root, replacing the
/// seminar's previous file; the template's width and height are read back
/// from the decoded image.
///
/// ### Responses
/// - `200 OK` — the stored template
/// - `400 Bad Request` — missing `seminar_id`, bad field value, undecodable image
/// - `404 Not Found` — unknown seminar
pub async fn upsert_template(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match parse_form(multipart).await {
        Ok(form) => form,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<CertificateTemplate>::error(message)),
            );
        }
    };

    let Some(seminar_id) = form.seminar_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CertificateTemplate>::error(
                "seminar_id is required",
            )),
        );
    };

    if let Err(message) = validate_form(&form) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CertificateTemplate>::error(message)),
        );
    }

    let db = app_state.db();

    match SeminarModel::find_by_id(db, seminar_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<CertificateTemplate>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CertificateTemplate>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    let existing = match CertificateTemplate::find_for_seminar(db, seminar_id).await {
        Ok(existing) => existing,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CertificateTemplate>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    // Store the uploaded image first so a bad file never clobbers the row.
    let mut new_image: Option<(String, i32, i32)> = None;
    if let Some((filename, bytes)) = &form.image {
        let is_image = mime_guess::from_path(filename)
            .first()
            .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE);
        if !is_image {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<CertificateTemplate>::error(
                    "The uploaded file must be an image",
                )),
            );
        }

        let decoded = match image::load_from_memory(bytes) {
            Ok(decoded) => decoded,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<CertificateTemplate>::error(format!(
                        "Could not decode image: {e}"
                    ))),
                );
            }
        };

        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        let stored_name = format!("template.{extension}");
        let path = paths::certificate_template_path(seminar_id, &stored_name);

        let write = paths::ensure_parent_dir(&path).and_then(|_| std::fs::write(&path, bytes));
        if let Err(e) = write {
            error!(seminar = seminar_id, "Failed to store template image: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CertificateTemplate>::error(
                    "Failed to store template image",
                )),
            );
        }

        // Remove the previous file when its name differs.
        if let Some(previous) = existing.as_ref().and_then(|t| t.image_path.clone()) {
            let previous_path = paths::media_root().join(&previous);
            if previous_path != path {
                if let Err(e) = std::fs::remove_file(&previous_path) {
                    warn!(seminar = seminar_id, "Failed to remove old template image: {e}");
                }
            }
        }

        let relative = format!(
            "certificate_templates/seminar_{seminar_id}/{stored_name}"
        );
        new_image = Some((relative, decoded.width() as i32, decoded.height() as i32));
    }

    let base = existing
        .clone()
        .unwrap_or_else(|| CertificateTemplate::default_for_seminar(seminar_id));

    let mut active: certificate_template::ActiveModel = match existing {
        Some(template) => template.into(),
        None => certificate_template::ActiveModel {
            seminar_id: Set(seminar_id),
            image_path: Set(None),
            template_width: Set(base.template_width),
            template_height: Set(base.template_height),
            name_x_percent: Set(base.name_x_percent),
            name_y_percent: Set(base.name_y_percent),
            name_font_size: Set(base.name_font_size),
            name_font: Set(base.name_font.clone()),
            name_color: Set(base.name_color.clone()),
            title_x_percent: Set(base.title_x_percent),
            title_y_percent: Set(base.title_y_percent),
            title_font_size: Set(base.title_font_size),
            title_font: Set(base.title_font.clone()),
            title_color: Set(base.title_color.clone()),
            show_title: Set(base.show_title),
            default_used: Set(true),
            uploaded_at: Set(chrono::Utc::now()),
            ..Default::default()
        },
    };

    if let Some((relative, width, height)) = new_image {
        active.image_path = Set(Some(relative));
        active.template_width = Set(width);
        active.template_height = Set(height);
        active.default_used = Set(false);
    }
    if let Some(v) = form.name_x_percent {
        active.name_x_percent = Set(v);
    }
    if let Some(v) = form.name_y_percent {
        active.name_y_percent = Set(v);
    }
    if let Some(v) = form.name_font_size {
        active.name_font_size = Set(v);
    }
    if let Some(v) = form.name_font {
        active.name_font = Set(v);
    }
    if let Some(v) = form.name_color {
        active.name_color = Set(v);
    }
    if let Some(v) = form.title_x_percent {
        active.title_x_percent = Set(v);
    }
    if let Some(v) = form.title_y_percent {
        active.title_y_percent = Set(v);
    }
    if let Some(v) = form.title_font_size {
        active.title_font_size = Set(v);
    }
    if let Some(v) = form.title_font {
        active.title_font = Set(v);
    }
    if let Some(v) = form.title_color {
        active.title_color = Set(v);
    }
    if let Some(v) = form.show_title {
        active.show_title = Set(v);
    }
    active.uploaded_at = Set(chrono::Utc::now());

    let is_update = matches!(active.id, sea_orm::ActiveValue::Unchanged(_));
    let saved = if is_update {
        active.update(db).await
    } else {
        active.insert(db).await
    };

    match saved {
        Ok(template) => (
            StatusCode::OK,
            Json(ApiResponse::success(template, "Template saved successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CertificateTemplate>::error(format!(
                "Database error: {e}"
            ))),
        ),
    }
}

#[derive(Debug, Serialize)]
pub struct ResendResponse {
    pub certificate_url: String,
}

/// POST /certificates/resend/{seminar_id}/{user_id}
///
/// Regenerate and re-email a participant's certificate. Requires an
/// attendance row and a completed evaluation, the same gates the original
/// send went through.
///
/// ### Responses
/// - `200 OK` — the regenerated certificate as a data URL
/// - `400 Bad Request` — no completed evaluation
/// - `404 Not Found` — unknown seminar/user, or no attendance
pub async fn resend_certificate(
    State(app_state): State<AppState>,
    Path((seminar_id, user_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let db = app_state.db();

    let seminar = match SeminarModel::find_by_id(db, seminar_id).await {
        Ok(Some(seminar)) => seminar,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ResendResponse>::error("Seminar not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResendResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    let user = match UserModel::find_by_id(db, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ResendResponse>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResendResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    };

    match db::models::attendance::Model::find_for_user_and_seminar(db, user_id, seminar_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ResendResponse>::error(
                    "No attendance record for this user and seminar",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResendResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    match EvaluationModel::has_completed(db, user_id, seminar_id).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ResendResponse>::error(
                    "The user has not completed the evaluation",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResendResponse>::error(format!(
                    "Database error: {e}"
                ))),
            );
        }
    }

    match certificate::generate_and_send(db, &seminar, &user).await {
        Ok(certificate_url) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ResendResponse { certificate_url },
                "Certificate resent successfully",
            )),
        ),
        Err(e) => {
            error!(user = user_id, seminar = seminar_id, "Failed to regenerate certificate: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResendResponse>::error(
                    "Failed to generate the certificate",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_must_be_rrggbb() {
        assert!(is_hex_color("#1a2b3c"));
        assert!(is_hex_color("#FFFFFF"));
        assert!(!is_hex_color("1a2b3c"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("#a\u{e9}1a1"));
        assert!(!is_hex_color("red"));
    }

    #[test]
    fn bad_color_is_rejected_before_storage() {
        let form = TemplateForm {
            name_color: Some("a\u{e9}1a1".to_string()),
            ..Default::default()
        };
        assert_eq!(validate_form(&form), Err("Colors must be in #rrggbb form"));

        let form = TemplateForm {
            title_color: Some("#00ff00".to_string()),
            ..Default::default()
        };
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn percent_and_font_bounds_are_enforced() {
        let form = TemplateForm {
            name_x_percent: Some(120.0),
            ..Default::default()
        };
        assert!(validate_form(&form).is_err());

        let form = TemplateForm {
            title_font_size: Some(5),
            ..Default::default()
        };
        assert!(validate_form(&form).is_err());
    }
}
