use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AdminAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Guards the dashboard routes with the token issued by `/admin/unlock`.
pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HandlerError::unauthorized("Missing authorization header"))?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|e| HandlerError::unauthorized(e.to_string()))?;
    let claims = state
        .jwt_utils
        .validate_admin_token(&token)
        .map_err(|e| HandlerError::unauthorized(e.to_string()))?;

    debug!(jti = %claims.jti, "Admin request authorized");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
