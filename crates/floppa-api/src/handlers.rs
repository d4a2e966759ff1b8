//! Request handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::debug;

use floppa_core::ExternalId;

use crate::VERSION;
use crate::animals::{Animal, AnimalInfo};
use crate::error::ApiError;
use crate::server::AppState;

fn lookup<'a>(state: &'a AppState, endpoint: &str) -> Result<&'a Animal, ApiError> {
    state
        .animals
        .get(endpoint)
        .ok_or_else(|| ApiError::UnknownAnimal(endpoint.to_string()))
}

/// Image response that browsers and proxies never cache, so every
/// request shows a new animal.
fn image_response(bytes: Bytes) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        bytes,
    )
        .into_response()
}

/// `GET /{animal}`
pub async fn random_image(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
) -> Result<Response, ApiError> {
    let animal = lookup(&state, &endpoint)?;
    let image = state
        .with_deadline(animal.source.as_image_source().random_image())
        .await?;

    if let (Some(source), Some(record)) = (animal.source.as_pocketbase(), &image.record) {
        source.schedule_view_update(record);
    }

    debug!(%endpoint, size = image.bytes.len(), "Serving image");
    Ok(image_response(image.bytes))
}

/// `GET /{animal}/count`
pub async fn count(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let animal = lookup(&state, &endpoint)?;
    let count = state
        .with_deadline(animal.source.as_image_source().count())
        .await?;

    Ok(Json(json!({ "count": count })))
}

/// `GET /{animal}/vim/{external_id}`
pub async fn image_by_external_id(
    State(state): State<AppState>,
    Path((endpoint, external_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let animal = lookup(&state, &endpoint)?;
    let source = match animal.source.as_pocketbase() {
        Some(source) if animal.external_id_lookup => source,
        _ => return Err(ApiError::LookupDisabled(endpoint)),
    };

    let external_id =
        ExternalId::new(external_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let bytes = state
        .with_deadline(source.image_by_external_id(&external_id))
        .await?;

    debug!(%endpoint, %external_id, size = bytes.len(), "Serving image by external id");
    Ok(image_response(bytes))
}

/// `GET /api/animals`
pub async fn list_animals(State(state): State<AppState>) -> Json<Vec<AnimalInfo>> {
    Json(state.animals.infos())
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": VERSION,
    }))
}
