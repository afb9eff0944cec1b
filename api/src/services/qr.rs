//! QR code generation for attendance scanning.
//!
//! Each seminar owns a check-in and a check-out token. The codes encode a
//! frontend URL that carries the action, seminar id and token, so a phone
//! camera lands the attendee on the scan page with everything prefilled.

use ab_glyph::{FontArc, PxScale};
use base64::Engine;
use image::{DynamicImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use qrcode::QrCode;
use std::io::Cursor;

use common::{config, paths};
use db::models::attendance::ScanAction;

type QrError = Box<dyn std::error::Error + Send + Sync>;

const LABEL_FONT_SIZE: f32 = 28.0;
const LABEL_STRIP_HEIGHT: u32 = 48;

/// Builds the URL a scanned code opens in the frontend.
pub fn scan_url(action: ScanAction, seminar_id: i64, token: &str) -> String {
    format!(
        "{}/attendance?action={}&seminar={}&token={}",
        config::frontend_url(),
        action.as_str(),
        seminar_id,
        token
    )
}

/// Renders `payload` as a PNG QR image, optionally with a text label strip
/// underneath. If no bundled font can be loaded the label is omitted rather
/// than failing the request.
pub fn qr_png_bytes(payload: &str, label: Option<&str>) -> Result<Vec<u8>, QrError> {
    let code = QrCode::new(payload.as_bytes())?;
    let qr_image = code
        .render::<Luma<u8>>()
        .min_dimensions(400, 400)
        .quiet_zone(true)
        .build();

    let image = match label.and_then(|text| label_font().map(|font| (text, font))) {
        Some((text, font)) => labelled_image(&qr_image, text, &font),
        None => DynamicImage::ImageLuma8(qr_image).to_rgb8(),
    };

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Same as [`qr_png_bytes`] but wrapped as a `data:` URL for direct embedding
/// in JSON responses.
pub fn qr_data_url(payload: &str, label: Option<&str>) -> Result<String, QrError> {
    let bytes = qr_png_bytes(payload, label)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

fn label_font() -> Option<FontArc> {
    let path = paths::font_path(db::models::certificate_template::DEFAULT_FONT);
    let data = std::fs::read(path).ok()?;
    FontArc::try_from_vec(data).ok()
}

fn labelled_image(qr: &image::GrayImage, text: &str, font: &FontArc) -> RgbImage {
    let (w, h) = qr.dimensions();
    let mut canvas = RgbImage::from_pixel(w, h + LABEL_STRIP_HEIGHT, Rgb([255, 255, 255]));

    for (x, y, px) in qr.enumerate_pixels() {
        let v = px.0[0];
        canvas.put_pixel(x, y, Rgb([v, v, v]));
    }

    let scale = PxScale::from(LABEL_FONT_SIZE);
    let (text_w, text_h) = text_size(scale, font, text);
    let x = (w.saturating_sub(text_w) / 2) as i32;
    let y = h as i32 + ((LABEL_STRIP_HEIGHT.saturating_sub(text_h)) / 2) as i32;
    draw_text_mut(&mut canvas, Rgb([0, 0, 0]), x, y, scale, font, text);

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_config() {
        unsafe {
            std::env::set_var("DATABASE_PATH", "test.db");
            std::env::set_var("MEDIA_STORAGE_ROOT", "media");
            std::env::set_var("JWT_SECRET", "test-secret");
        }
    }

    #[test]
    fn scan_url_carries_action_and_token() {
        init_test_config();
        common::config::AppConfig::set_frontend_url("https://podium.example.com");

        let url = scan_url(ScanAction::CheckIn, 42, "abc-123");
        assert_eq!(
            url,
            "https://podium.example.com/attendance?action=check_in&seminar=42&token=abc-123"
        );
    }

    #[test]
    fn qr_bytes_are_png() {
        let bytes = qr_png_bytes("https://example.com/scan", None).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn data_url_has_png_prefix() {
        let url = qr_data_url("payload", None).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
