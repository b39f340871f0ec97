//! Custom Axum extractors

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ErrorResponse;

/// `Json<T>` whose rejection is the service's own `{message}` 400 body
///
/// Axum's default rejections are plain text and use 415/422; clients of this
/// API only ever see 400 for a body that can't be read.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                Err(ErrorResponse::new("invalid request body")
                    .into_response_with(StatusCode::BAD_REQUEST))
            }
        }
    }
}

/// `:id` path segment that must parse as an `i64`
///
/// Range checks (positive ids) stay in the services; this only turns a
/// non-numeric segment into a `{message}` 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(TaskId(id)),
            Err(rejection) => {
                debug!("Rejected path id: {}", rejection.body_text());
                Err(ErrorResponse::new("invalid ID format")
                    .into_response_with(StatusCode::BAD_REQUEST))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn echo_id(TaskId(id): TaskId) -> String {
        id.to_string()
    }

    async fn call(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = Router::new()
            .route("/items/:id", get(echo_id))
            .oneshot(
                axum::http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_numeric_id_is_extracted() {
        let (status, body) = call("/items/17").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"17");
    }

    #[tokio::test]
    async fn test_non_numeric_and_overflowing_ids_get_json_400() {
        for uri in ["/items/abc", "/items/99999999999999999999", "/items/1.5"] {
            let (status, body) = call(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);

            let body: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(body, serde_json::json!({ "message": "invalid ID format" }));
        }
    }
}
