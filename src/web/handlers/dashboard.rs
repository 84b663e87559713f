//! Dashboard handler for the Web API.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::dashboard::DashboardView;
use crate::web::dto::ApiResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /api/dashboard - Storage usage summary for the caller.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<DashboardView>>, ApiError> {
    let view = state.dashboard.summarize(user_id).await?;
    Ok(Json(ApiResponse::new(view)))
}
