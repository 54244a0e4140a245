use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::{verify_token, TokenType};
use crate::error::AppError;
use crate::AppState;

/// The caller, as established by the bearer token. Every daily log and
/// habit score query is scoped to `id`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(req.headers()) else {
        tracing::debug!(path = %req.uri().path(), "Missing bearer token");
        return Err(AppError::Unauthorized);
    };

    let claims = verify_token(token, &state.config)?.claims;

    if claims.token_type != TokenType::Access {
        tracing::debug!(user_id = %claims.sub, "Rejected non-access token");
        return Err(AppError::Unauthorized);
    }

    tracing::debug!(
        user_id = %claims.sub,
        email = %claims.email,
        path = %req.uri().path(),
        "Authenticated request"
    );

    req.extensions_mut().insert(AuthUser { id: claims.sub });
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
