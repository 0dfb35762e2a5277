use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::{instrument, warn};

use super::cookies::ACCESS_COOKIE;
use crate::shared::{AppError, AppState};

/// Cookie authentication middleware - verifies the access-token cookie and
/// adds AccessClaims to the request.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), auth::require_auth))
/// Handlers can then extract Extension(claims): Extension<AccessClaims>.
///
/// Verification is stateless: signature and expiry only, no account lookup.
/// Endpoints that must observe deactivation re-resolve the account.
#[instrument(skip(state, jar, req, next))]
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());

    let token = token.ok_or_else(|| {
        warn!(uri = %req.uri(), "Request without access-token cookie");
        AppError::MissingToken
    })?;

    let claims = state.token_config.verify_access_token(&token).ok_or_else(|| {
        warn!(uri = %req.uri(), "Access-token cookie failed verification");
        AppError::InvalidToken
    })?;

    // Add claims to request extensions for handlers to use
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
