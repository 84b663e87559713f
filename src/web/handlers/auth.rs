//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::auth::{hash_password, validate_password, verify_password};
use crate::db::{NewUser, UserRepository};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserInfo, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// Build the session cookie carrying a freshly issued token.
fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((state.cookie_name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(state.tokens.expiry_secs() as i64))
        .build()
}

/// POST /api/auth/register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError> {
    validate_password(&req.password)
        .map_err(|e| ApiError::bad_request(format!("Password error: {}", e)))?;

    let password_hash = hash_password(&req.password)
        .map_err(|_| ApiError::internal("Failed to hash password"))?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .create(&NewUser::new(&req.name, &req.email, password_hash))
        .await?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(user.into()))))
}

/// POST /api/auth/login - Verify credentials and set the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::unauthorized("Invalid email or password"))?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|_| ApiError::internal("Failed to create session"))?;
    let jar = jar.add(session_cookie(&state, token.clone()));

    let response = LoginResponse {
        token,
        user: user.into(),
    };

    Ok((jar, Json(ApiResponse::new(response))))
}

/// POST /api/auth/logout - Clear the session cookie.
///
/// Tokens are stateless, so logout only discards the cookie; an extracted
/// token stays valid until its natural expiry.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    let removal = Cookie::build((state.cookie_name.clone(), ""))
        .path("/")
        .build();
    let jar = jar.remove(removal);

    (jar, Json(ApiResponse::new(())))
}

/// GET /api/auth/get - Fetch the caller's profile.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(user.into())))
}
