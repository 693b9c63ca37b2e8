//! JWT authentication extractor for Axum handlers.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::auth as auth_service;
use crate::AppState;

/// Authenticated learner extracted from a JWT access token.
///
/// The token is read from `Authorization: Bearer ...` first and falls back to
/// the session cookie, so both API clients and browser page loads work:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts) {
            Some(token) => token,
            None => CookieJar::from_headers(&parts.headers)
                .get(&state.config.auth_cookie_name)
                .map(|cookie| cookie.value().to_string())
                .ok_or(AppError::Unauthorized)?,
        };

        let claims = auth_service::validate_token(&token, &state.config.jwt_secret)?;

        if claims.token_type != auth_service::ACCESS_TOKEN {
            return Err(AppError::Unauthorized);
        }

        let user_id: Uuid = claims
            .user_id
            .parse()
            .map_err(|_| AppError::Unauthorized)?;

        Ok(CurrentUser {
            id: user_id,
            email: claims.sub,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}
