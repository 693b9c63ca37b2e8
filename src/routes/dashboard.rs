//! Dashboard routes: the learner's courses, counters and resume banner.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::dashboard::DashboardView;
use crate::services::dashboard;
use crate::AppState;

const PAGE_PATH: &str = "/dashboard";

/// GET /api/v1/dashboard — dashboard view for the signed-in learner.
pub async fn show(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let view = dashboard::load(&state.db, user.id).await?;
    Ok(ApiResponse::success(view))
}

/// GET /dashboard — page entry point; sends signed-out visitors to the login page.
pub async fn page(
    State(state): State<AppState>,
    user: Result<CurrentUser, AppError>,
) -> Result<Response, AppError> {
    let to_login = || Redirect::to(&state.config.login_redirect(PAGE_PATH)).into_response();

    let Ok(user) = user else {
        return Ok(to_login());
    };

    match dashboard::load(&state.db, user.id).await {
        Ok(view) => Ok(ApiResponse::success(view).into_response()),
        Err(e) if e.is_unauthorized() => Ok(to_login()),
        Err(e) => Err(e),
    }
}
