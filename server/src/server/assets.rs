//! Embedded static files: the form page template and its stylesheet.

use axum::extract::Path;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "assets/"]
struct WebAssets;

/// Name of the form page template inside the embedded folder.
pub const INDEX_TEMPLATE: &str = "index.html";

/// GET /static/{*path}
pub async fn static_handler(Path(path): Path<String>) -> Response {
    if path == INDEX_TEMPLATE {
        return not_found(&format!("/static/{path}"));
    }
    serve_embedded::<WebAssets>(&path)
}

/// Fallback handler for unmatched paths.
/// Uses `Uri` instead of `Path` because fallback has no capture parameter.
pub async fn fallback(uri: Uri) -> Response {
    not_found(uri.path())
}

/// Load the form page template as UTF-8 text.
pub fn index_template() -> Option<String> {
    let file = WebAssets::get(INDEX_TEMPLATE)?;
    String::from_utf8(file.data.into_owned()).ok()
}

fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({
            "error": "Not Found",
            "path": path,
        })),
    )
        .into_response()
}

fn serve_embedded<E: Embed>(path: &str) -> Response {
    match E::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.as_ref()),
                    (header::CACHE_CONTROL, "public, max-age=86400"),
                ],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => not_found(&format!("/static/{path}")),
    }
}
