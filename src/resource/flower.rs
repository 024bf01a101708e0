use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::AppState;
use crate::extractors::ApiJson;
use crate::models::{Flower, FlowerUpdate};
use crate::update::build_update_set;

fn flower_not_found(id: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("Flower with ID {} not found", id)})),
    )
}

/// Static welcome payload at the service root.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({"message": "Flower collection service"}))
}

/// POST /flower: insert a new flower and return it with its assigned id.
/// Required-field validation happens in the `ApiJson<Flower>` extractor; a
/// malformed or incomplete body is rejected with 422 before this runs.
pub async fn create_flower(
    State((backend, _config)): State<AppState>,
    ApiJson(flower): ApiJson<Flower>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match backend.insert_flower(&flower).await {
        Ok(created) => {
            let mut headers = HeaderMap::new();
            if let Some(ref id) = created.id {
                if let Ok(location) = HeaderValue::from_str(&format!("/flower/{}", id)) {
                    headers.insert("Location", location);
                }
            }

            let mut response = Json(created).into_response();
            *response.status_mut() = StatusCode::CREATED;
            response.headers_mut().extend(headers);
            Ok(response)
        }
        Err(e) => Err(e.to_response()),
    }
}

/// GET /flower: list up to the configured page size of flowers.
pub async fn list_flowers(
    State((backend, config)): State<AppState>,
) -> Result<Json<Vec<Flower>>, (StatusCode, Json<serde_json::Value>)> {
    match backend.find_all_flowers(config.api.page_size).await {
        Ok(flowers) => Ok(Json(flowers)),
        Err(e) => Err(e.to_response()),
    }
}

/// GET /flower/{id}: fetch a single flower by id.
pub async fn find_flower(
    State((backend, _config)): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Flower>, (StatusCode, Json<serde_json::Value>)> {
    match backend.find_flower_by_id(&id).await {
        Ok(Some(flower)) => Ok(Json(flower)),
        Ok(None) => Err(flower_not_found(&id)),
        // InvalidId maps to the same 404 as a missing record.
        Err(e) => Err(e.to_response()),
    }
}

/// PUT /flower/{id}: field-level partial update.
///
/// Only explicitly supplied fields are touched. When the payload sets
/// nothing at all, the update call is skipped entirely and the current
/// record is returned as-is, so "confirm current state" still works without
/// conflating it with "record not found".
pub async fn update_flower(
    State((backend, _config)): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<FlowerUpdate>,
) -> Result<Json<Flower>, (StatusCode, Json<serde_json::Value>)> {
    let update = build_update_set(&payload);

    if !update.is_empty() {
        match backend.update_flower_fields(&id, &update).await {
            Ok(true) => {}
            Ok(false) => return Err(flower_not_found(&id)),
            Err(e) => return Err(e.to_response()),
        }
    }

    match backend.find_flower_by_id(&id).await {
        Ok(Some(flower)) => Ok(Json(flower)),
        Ok(None) => Err(flower_not_found(&id)),
        Err(e) => Err(e.to_response()),
    }
}

/// DELETE /flower/{id}: remove a flower; 204 with no body on success.
pub async fn delete_flower(
    State((backend, _config)): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match backend.delete_flower(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT.into_response()),
        Ok(false) => Err(flower_not_found(&id)),
        Err(e) => Err(e.to_response()),
    }
}
