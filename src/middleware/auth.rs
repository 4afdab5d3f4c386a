use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{validate_jwt, Caller};
use crate::error::ApiError;
use crate::state::AppState;

/// Bearer authentication for every resource route.
///
/// Validates the JWT, resolves its subject to an active user in the store and
/// injects the resulting [`Caller`] into the request extensions.
pub async fn require_caller(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = extract_bearer_token(request.headers()).map_err(|msg| {
            warn!("Authentication failed for {}: {}", request.uri().path(), msg);
            ApiError::unauthorized(msg)
        })?;

        validate_jwt(token, &state.config.security.jwt_secret).map_err(|e| {
            warn!("Authentication failed for {}: {}", request.uri().path(), e);
            ApiError::unauthorized("Invalid token.")
        })?
    };

    let user = state
        .store
        .find_user(claims.sub)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| {
            warn!("Authentication failed: user {} missing or inactive", claims.sub);
            ApiError::unauthorized("User inactive or deleted.")
        })?;

    debug!("Authenticated {} ({})", user.email, user.id);
    request.extensions_mut().insert(Caller {
        user_id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or("Authentication credentials were not provided.")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("Empty bearer token");
    }
    Ok(token)
}
