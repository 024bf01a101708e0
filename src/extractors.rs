use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

/// JSON body extractor with the service's error-mapping policy: a wrong
/// content type is refused outright, and any deserialization failure (bad
/// syntax, missing required field, wrong type) rejects the request with 422
/// before a handler runs.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(content_type) = req.headers().get(header::CONTENT_TYPE) {
            let content_type_str = content_type
                .to_str()
                .map_err(|_| ApiJsonRejection::UnsupportedContentType)?;

            // Strip parameters such as charset before comparing.
            let media_type = content_type_str
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_lowercase();

            if media_type != "application/json" {
                return Err(ApiJsonRejection::UnsupportedContentType);
            }
        }

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiJsonRejection::JsonRejection(rejection)),
        }
    }
}

pub enum ApiJsonRejection {
    UnsupportedContentType,
    JsonRejection(JsonRejection),
}

impl IntoResponse for ApiJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ApiJsonRejection::UnsupportedContentType => {
                let body = Json(json!({
                    "message": "Content-Type must be application/json"
                }));
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, body).into_response()
            }
            ApiJsonRejection::JsonRejection(rejection) => {
                let body = Json(json!({
                    "message": format!("Invalid request body: {}", rejection)
                }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
        }
    }
}
