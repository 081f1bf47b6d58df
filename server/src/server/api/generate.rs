//! Form page and QR generation endpoints.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::Value;

use crate::app::SharedState;
use crate::services::form::{BackgroundMode, QrForm, Upload, parse_checkbox};
use crate::services::generator::QrService;
use crate::server::page::{Outcome, PageView};

use super::err_json;

type PageResult = Result<Response, (StatusCode, Json<Value>)>;

/// GET / – Blank form with the configured default colors
pub async fn index(State(state): State<SharedState>) -> PageResult {
    let config = state.config();
    let view = PageView::blank(
        config.default_color.to_string(),
        config.default_background.to_string(),
    );
    render(&view, StatusCode::OK)
}

/// POST /generate – Validate the submitted form and render the QR code
pub async fn generate(State(state): State<SharedState>, multipart: Multipart) -> PageResult {
    let form = read_form(multipart).await?;

    let request = match form.validate() {
        Ok(request) => request,
        Err(warning) => {
            tracing::warn!(%warning, "Form submission rejected");
            let view = PageView::from_form(&form, Outcome::Warning(warning.to_string()));
            return render(&view, StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    let svc = QrService::new(state.qr_options());
    let png = svc.render(request).await.map_err(|e| {
        tracing::error!("QR generation failed: {e}");
        err_json(500, &e.to_string())
    })?;

    render(&PageView::from_form(&form, Outcome::Image(png)), StatusCode::OK)
}

fn render(view: &PageView, status: StatusCode) -> PageResult {
    let html = view.render().map_err(|e| err_json(500, e))?;
    Ok((status, Html(html)).into_response())
}

/// Collect the multipart fields of one submission.
///
/// Unknown fields are skipped. Missing color fields keep their empty value and
/// are rejected by validation.
async fn read_form(mut multipart: Multipart) -> Result<QrForm, (StatusCode, Json<Value>)> {
    let mut form = QrForm::default();
    let bad_request = |e: axum::extract::multipart::MultipartError| {
        err_json(e.status().as_u16(), &e.body_text())
    };

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "background_image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(bad_request)?;
                form.upload = Some(Upload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            "data" => form.data = field.text().await.map_err(bad_request)?,
            "color" => form.color = field.text().await.map_err(bad_request)?,
            "background_color" => form.background_color = field.text().await.map_err(bad_request)?,
            "background" => {
                form.background = BackgroundMode::from_form(&field.text().await.map_err(bad_request)?)
            }
            "gradient" => form.gradient = parse_checkbox(&field.text().await.map_err(bad_request)?),
            _ => {}
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::{Body, to_bytes};
    use axum::extract::FromRequest;
    use axum::http::{Request, header};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use image::{DynamicImage, GenericImageView, RgbImage};

    const BOUNDARY: &str = "qrformboundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    async fn multipart_from(parts: &[Part<'_>]) -> Multipart {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(name, filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/generate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    fn state() -> SharedState {
        SharedState::new(AppConfig::default())
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn inlined_png(html: &str) -> DynamicImage {
        let start = html.find("data:image/png;base64,").unwrap() + "data:image/png;base64,".len();
        let end = start + html[start..].find('"').unwrap();
        let png = STANDARD.decode(&html[start..end]).unwrap();
        qr_engine::decode_image(&png).unwrap()
    }

    #[tokio::test]
    async fn index_renders_blank_form() {
        let response = index(State(state())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Generate Fancy QR Code"));
        assert!(!html.contains("<figure>"));
    }

    #[tokio::test]
    async fn plain_submission_renders_native_size_image() {
        let multipart = multipart_from(&[
            Part::Text("data", "https://example.com"),
            Part::Text("color", "#000000"),
            Part::Text("background_color", "#ffffff"),
            Part::Text("background", "plain"),
        ])
        .await;

        let response = generate(State(state()), multipart).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<figcaption>Fancy QR Code</figcaption>"));

        let img = inlined_png(&html);
        let edge = qr_engine::symbol_size("https://example.com", &AppConfig::default().qr_options())
            .unwrap();
        assert_eq!(img.dimensions(), (edge, edge));
        assert!(img.to_rgba8().pixels().all(|p| p[3] == 255));
    }

    #[tokio::test]
    async fn empty_data_renders_warning() {
        let multipart = multipart_from(&[
            Part::Text("data", ""),
            Part::Text("color", "#000000"),
            Part::Text("background_color", "#ffffff"),
        ])
        .await;

        let response = generate(State(state()), multipart).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("Please enter the data for the QR code."));
        assert!(!html.contains("<figure>"));
    }

    #[tokio::test]
    async fn invalid_upload_renders_warning() {
        let multipart = multipart_from(&[
            Part::Text("data", "hello"),
            Part::Text("color", "#000000"),
            Part::Text("background_color", "#ffffff"),
            Part::Text("background", "image"),
            Part::File("background_image", "fake.png", b"plain text, not a png"),
        ])
        .await;

        let response = generate(State(state()), multipart).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("Please upload a valid image file."));
        assert!(!html.contains("<figure>"));
    }

    #[tokio::test]
    async fn background_and_gradient_submission() {
        let bg = qr_engine::encode_png(&DynamicImage::ImageRgb8(RgbImage::new(200, 100))).unwrap();
        let multipart = multipart_from(&[
            Part::Text("data", "hello"),
            Part::Text("color", "#ff0070"),
            Part::Text("background_color", "#ffffff"),
            Part::Text("background", "image"),
            Part::File("background_image", "bg.png", &bg),
            Part::Text("gradient", "on"),
        ])
        .await;

        let response = generate(State(state()), multipart).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"name="gradient" checked>"#));

        let img = inlined_png(&html).to_rgba8();
        assert_eq!(img.dimensions(), (200, 100));
        assert_eq!(img.get_pixel(0, 50)[3], 0);
        assert_eq!(img.get_pixel(199, 50)[3], (255 * 199 / 200) as u8);
    }
}
