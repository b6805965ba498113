/// Request extractors with uniform error responses
///
/// Axum's stock `Json` and `Query` extractors reject malformed input
/// with their own status codes (422 for bad JSON bodies) and plain-text
/// bodies. Handlers use these wrappers instead so an unparseable body or
/// query string comes back as a 400 with the same
/// `{"success": false, "message": ...}` envelope as every other error.
use axum::{
    extract::{rejection::QueryRejection, FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ApiError;

/// JSON body extractor that rejects with an [`ApiError`]
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string extractor that rejects with an [`ApiError`]
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::Service as _;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct StatusBody {
        status: worklane_shared::models::task::TaskStatus,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct PageQuery {
        page: u32,
    }

    fn test_app() -> Router {
        Router::new()
            .route(
                "/statuses",
                post(|Json(_body): Json<StatusBody>| async { StatusCode::OK }),
            )
            .route(
                "/pages",
                get(|Query(_q): Query<PageQuery>| async { StatusCode::OK }),
            )
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_body_uses_error_envelope() {
        let mut app = test_app();
        let response = app
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/statuses")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_enum_value_uses_error_envelope() {
        // "archived" is not a task status; the closed enum rejects it
        let mut app = test_app();
        let response = app
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/statuses")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"status":"archived"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_valid_body_accepted() {
        let mut app = test_app();
        let response = app
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/statuses")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"status":"in-progress"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unparseable_query_uses_error_envelope() {
        let mut app = test_app();
        let response = app
            .call(
                Request::builder()
                    .uri("/pages?page=not-a-number")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }
}
