/*
 * Responsibility
 * - Shared AppError for the HTTP boundary
 * - IntoResponse mapping (401 fixed text + CORS headers, 403/400/500 JSON)
 * - Internal causes are logged where they happen and never reach the body
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::middleware::auth::gate::DenialReason;
use crate::middleware::auth::guard::AccessDenied;
use crate::services::auth::token::TokenError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unauthenticated: {0:?}")]
    Unauthenticated(DenialReason),
    #[error("forbidden: {0}")]
    Forbidden(AccessDenied),
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthenticated(reason) => return unauthenticated_response(reason),
            AppError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", message),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".into()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

// 401 carries one of the fixed denial texts and its own CORS headers, since
// it is produced before the request reaches any route.
fn unauthenticated_response(reason: DenialReason) -> Response {
    let mut res = (StatusCode::UNAUTHORIZED, reason.message()).into_response();
    let headers = res.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    res
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_text(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_unauthenticated_has_fixed_text_and_cors() {
        let res = AppError::Unauthenticated(DenialReason::BadFormat).into_response();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let h = res.headers();
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            h[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            h[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
        assert_eq!(
            body_text(res).await,
            "invalid token format, Bearer prefix required"
        );
    }

    #[tokio::test]
    async fn test_forbidden_hides_detail() {
        let res = AppError::Forbidden(AccessDenied::RoleInsufficient("admin".into())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let body = body_text(res).await;
        assert!(body.contains("FORBIDDEN"));
        assert!(!body.contains("admin"));
    }

    #[tokio::test]
    async fn test_internal() {
        let res = AppError::Internal.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
