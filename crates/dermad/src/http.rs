//! HTTP front end for the analysis engine.
//!
//! Two routes: `GET /` reports liveness, `POST /analyze` takes a multipart
//! image upload and returns the analysis result. Bad uploads are the
//! client's fault (400); anything that fails past decoding is reported as a
//! single opaque 500, never with cause detail.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;

use crate::engine::EngineHandle;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create the application router.
pub fn create_router(engine: EngineHandle) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(engine)
}

async fn status_handler() -> Json<serde_json::Value> {
    // The engine refuses to start without a loaded model, so a serving
    // daemon always reports model_loaded = true.
    Json(json!({
        "status": "Skin AI API is Running",
        "model_loaded": true,
    }))
}

async fn analyze_handler(
    State(engine): State<EngineHandle>,
    mut multipart: Multipart,
) -> Response {
    // Pull the uploaded file out of the multipart stream.
    let mut payload: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return bad_request("Malformed multipart payload."),
        };

        if field.name() != Some("file") {
            continue;
        }

        let is_image = field
            .content_type()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return bad_request("File must be an image.");
        }

        match field.bytes().await {
            Ok(bytes) => payload = Some(bytes.to_vec()),
            Err(_) => return bad_request("Malformed multipart payload."),
        }
        break;
    }

    let Some(payload) = payload else {
        return bad_request("File must be an image.");
    };

    let image = match image::load_from_memory(&payload) {
        Ok(image) => image,
        Err(err) => {
            tracing::warn!(error = %err, "image decode failed");
            return internal_error();
        }
    };

    match engine.analyze(image).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "analysis request failed");
            internal_error()
        }
    }
}

fn bad_request(detail: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal Server Error during analysis" })),
    )
        .into_response()
}
