use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    cookies::{CookiePolicy, ACCESS_COOKIE, REFRESH_COOKIE},
    service::SessionService,
    types::{
        LoginRequest, LoginResponse, LogoutResponse, RefreshResponse, UserPayload,
        VerifyLoginResponse,
    },
};
use crate::shared::{AppError, AppState};

/// HTTP handler for logging in
///
/// POST /auth/login
/// Sets the access/refresh cookie pair and returns the public identity
#[instrument(name = "login", skip(state, headers, jar, request))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    info!(email = %request.email, "Login requested");

    let service = SessionService::new(
        Arc::clone(&state.account_repository),
        state.token_config.clone(),
    );
    let (tokens, account) = service.login(&request.email, &request.password).await?;

    let policy = CookiePolicy::from_headers(&headers);
    let jar = jar
        .add(policy.access_cookie(tokens.access_token, state.token_config.access_ttl_minutes))
        .add(policy.refresh_cookie(tokens.refresh_token, state.token_config.refresh_ttl_days));

    info!(account_id = %account.id, role = %account.role, "Login cookies set");

    let response = LoginResponse {
        success: true,
        message: format!("{} login successful", account.role),
        user: UserPayload::from(&account),
    };

    Ok((jar, Json(response)))
}

/// HTTP handler for rotating the session tokens
///
/// POST /auth/refresh
/// Reads the refresh cookie, re-emits both cookies, returns a bare success
/// flag - token values travel only via cookies
#[instrument(name = "refresh", skip(state, headers, jar))]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, Json<RefreshResponse>), AppError> {
    let refresh_token = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    let service = SessionService::new(
        Arc::clone(&state.account_repository),
        state.token_config.clone(),
    );
    let tokens = service.refresh(refresh_token.as_deref()).await?;

    let policy = CookiePolicy::from_headers(&headers);
    let jar = jar
        .add(policy.access_cookie(tokens.access_token, state.token_config.access_ttl_minutes))
        .add(policy.refresh_cookie(tokens.refresh_token, state.token_config.refresh_ttl_days));

    Ok((jar, Json(RefreshResponse { success: true })))
}

/// HTTP handler for logging out
///
/// POST /auth/logout
/// Clears both session cookies unconditionally; no lookup, always succeeds,
/// idempotent
#[instrument(name = "logout", skip(headers, jar))]
pub async fn logout(headers: HeaderMap, jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let policy = CookiePolicy::from_headers(&headers);
    let jar = jar
        .add(policy.clear_cookie(ACCESS_COOKIE))
        .add(policy.clear_cookie(REFRESH_COOKIE));

    info!("Session cookies cleared");

    (
        jar,
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// HTTP handler for checking login state
///
/// GET /auth/verify
/// Always 200: an absent or invalid cookie is a normal logged-out outcome,
/// not a failure
#[instrument(name = "verify_login", skip(state, jar))]
pub async fn verify_login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<VerifyLoginResponse>, AppError> {
    let access_token = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());

    let service = SessionService::new(
        Arc::clone(&state.account_repository),
        state.token_config.clone(),
    );
    let account = service.verify_login(access_token.as_deref()).await?;

    let response = match account {
        Some(account) => VerifyLoginResponse {
            logged_in: true,
            user: Some(UserPayload::from(&account)),
        },
        None => VerifyLoginResponse {
            logged_in: false,
            user: None,
        },
    };

    Ok(Json(response))
}
