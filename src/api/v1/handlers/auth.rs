/*
 * Responsibility
 * - POST /login: check credentials against the UserStore, issue a token
 * - GET /unauthorized: landing path for rejected clients
 */
use axum::{
    Form, Json,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::api::v1::dto::login::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Accepts `username`/`password` as a urlencoded body or, failing that, as
/// query parameters.
pub async fn login(
    State(state): State<AppState>,
    query: Result<Query<LoginRequest>, QueryRejection>,
    form: Result<Form<LoginRequest>, FormRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let req = match (form, query) {
        (Ok(Form(req)), _) => req,
        (Err(_), Ok(Query(req))) => req,
        (Err(rejection), Err(_)) => {
            return Err(AppError::InvalidRequest(rejection.body_text()));
        }
    };

    if !state.users.verify(&req.username, &req.password).await {
        tracing::warn!(username = %req.username, "login failed");
        return Ok(Json(LoginResponse::failure()));
    }

    let token = state.codec.create(&req.username)?;
    tracing::info!(username = %req.username, "login succeeded");

    Ok(Json(LoginResponse::success(
        token,
        state.codec.ttl_seconds(),
    )))
}

pub async fn unauthorized() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, "unauthorized")
}
