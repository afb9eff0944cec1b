//! Certificate rendering and delivery.
//!
//! A certificate is the seminar's template background with the attendee's
//! name (and optionally the seminar title) drawn on top at percentage-based
//! coordinates, then emailed to the attendee as a PNG attachment. Seminars
//! without an uploaded template fall back to a stock background fetched from
//! `DEFAULT_CERTIFICATE_TEMPLATE_URL`.

use ab_glyph::{FontArc, PxScale};
use base64::Engine;
use image::{DynamicImage, Rgb, RgbImage, imageops::FilterType};
use imageproc::drawing::{draw_text_mut, text_size};
use sea_orm::DatabaseConnection;
use std::io::Cursor;
use thiserror::Error;
use tracing::{error, info};

use common::{config, paths};
use db::models::certificate_record::Model as CertificateRecord;
use db::models::certificate_template::Model as CertificateTemplate;
use db::models::seminar::Model as SeminarModel;
use db::models::user::Model as UserModel;

use crate::services::email::EmailService;

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("could not read template image: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode template image: {0}")]
    Image(#[from] image::ImageError),
    #[error("could not fetch default template: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("font '{0}' could not be loaded")]
    Font(String),
    #[error("no default template is configured")]
    NoDefaultTemplate,
}

/// Renders the certificate PNG for one attendee of one seminar.
pub async fn render_png(
    db: &DatabaseConnection,
    seminar: &SeminarModel,
    user: &UserModel,
) -> Result<Vec<u8>, CertificateError> {
    let template = match CertificateTemplate::find_for_seminar(db, seminar.id).await? {
        Some(t) => t,
        None => CertificateTemplate::default_for_seminar(seminar.id),
    };

    let background = load_background(&template).await?;
    let mut canvas = background
        .resize_exact(
            template.template_width as u32,
            template.template_height as u32,
            FilterType::Lanczos3,
        )
        .to_rgb8();

    let name = user.full_name();
    draw_centered_text(
        &mut canvas,
        &name,
        &template.name_font,
        template.name_font_size as f32,
        template.name_x_percent,
        template.name_y_percent,
        &template.name_color,
    )?;

    if template.show_title {
        draw_centered_text(
            &mut canvas,
            &seminar.title,
            &template.title_font,
            template.title_font_size as f32,
            template.title_x_percent,
            template.title_y_percent,
            &template.title_color,
        )?;
    }

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(canvas).write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Renders and emails the certificate, then records the send.
///
/// Rendering failures abort; an email failure is logged but does not fail the
/// call, so the caller can still return the rendered image.
pub async fn generate_and_send(
    db: &DatabaseConnection,
    seminar: &SeminarModel,
    user: &UserModel,
) -> Result<String, CertificateError> {
    let png = render_png(db, seminar, user).await?;
    let data_url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    );

    match EmailService::send_certificate_email(&user.email, &user.full_name(), &seminar.title, png)
        .await
    {
        Ok(()) => {
            CertificateRecord::upsert_sent(db, seminar.id, user.id, &user.email).await?;
            info!(
                user = user.id,
                seminar = seminar.id,
                "Certificate emailed"
            );
        }
        Err(e) => {
            error!(
                user = user.id,
                seminar = seminar.id,
                "Failed to email certificate: {e}"
            );
        }
    }

    Ok(data_url)
}

async fn load_background(template: &CertificateTemplate) -> Result<DynamicImage, CertificateError> {
    match &template.image_path {
        Some(rel) => {
            let path = paths::media_root().join(rel);
            Ok(image::open(path)?)
        }
        None => {
            let url = config::default_certificate_template_url();
            if url.is_empty() {
                return Err(CertificateError::NoDefaultTemplate);
            }
            let bytes = reqwest::get(&url).await?.error_for_status()?.bytes().await?;
            Ok(image::load_from_memory(&bytes)?)
        }
    }
}

fn draw_centered_text(
    canvas: &mut RgbImage,
    text: &str,
    font_name: &str,
    font_size: f32,
    x_percent: f32,
    y_percent: f32,
    color: &str,
) -> Result<(), CertificateError> {
    let font = load_font(font_name)?;
    let scale = PxScale::from(font_size);
    let (text_w, text_h) = text_size(scale, &font, text);

    let (anchor_x, anchor_y) = percent_to_pixels(
        canvas.width(),
        canvas.height(),
        x_percent,
        y_percent,
    );
    let x = anchor_x - (text_w as i32) / 2;
    let y = anchor_y - (text_h as i32) / 2;

    draw_text_mut(canvas, parse_hex_color(color), x, y, scale, &font, text);
    Ok(())
}

fn load_font(font_name: &str) -> Result<FontArc, CertificateError> {
    let path = paths::font_path(font_name);
    let data = std::fs::read(&path).map_err(|_| CertificateError::Font(font_name.to_owned()))?;
    FontArc::try_from_vec(data).map_err(|_| CertificateError::Font(font_name.to_owned()))
}

/// Converts a percentage anchor (0..100 of each axis) into pixel coordinates.
fn percent_to_pixels(width: u32, height: u32, x_percent: f32, y_percent: f32) -> (i32, i32) {
    let x = (width as f32 * x_percent / 100.0).round() as i32;
    let y = (height as f32 * y_percent / 100.0).round() as i32;
    (x, y)
}

/// Parses a `#rrggbb` color, falling back to black on malformed input.
fn parse_hex_color(color: &str) -> Rgb<u8> {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Rgb([0, 0, 0]);
    }
    let parse = |range| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
    Rgb([parse(0..2), parse(2..4), parse(4..6)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_anchor_maps_to_pixels() {
        assert_eq!(percent_to_pixels(2000, 1414, 50.0, 38.9), (1000, 550));
        assert_eq!(percent_to_pixels(2000, 1414, 0.0, 100.0), (0, 1414));
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#000000"), Rgb([0, 0, 0]));
        assert_eq!(parse_hex_color("#1a1a1a"), Rgb([26, 26, 26]));
        assert_eq!(parse_hex_color("ff8000"), Rgb([255, 128, 0]));
    }

    #[test]
    fn malformed_color_falls_back_to_black() {
        assert_eq!(parse_hex_color("#zzz"), Rgb([0, 0, 0]));
        assert_eq!(parse_hex_color(""), Rgb([0, 0, 0]));
        assert_eq!(parse_hex_color("#gg0000"), Rgb([0, 0, 0]));
    }

    #[test]
    fn multibyte_color_falls_back_to_black() {
        // six bytes but not six hex digits
        assert_eq!(parse_hex_color("a\u{e9}1a1"), Rgb([0, 0, 0]));
        assert_eq!(parse_hex_color("#\u{e9}\u{e9}\u{e9}"), Rgb([0, 0, 0]));
    }
}
