use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::UserIdentity;
use crate::database::models::User;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated user attached to the request by [`require_auth`]
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Authentication middleware: verifies the bearer token and resolves the
/// local user, provisioning one on first login. Rejects before any handler
/// or service logic runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers())?;
    let claims = state.verifier.verify(&token).await?;
    let identity = claims.identity()?;

    let user = resolve_user(&state.pool, &identity).await?;
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

/// Look up the user by external id, creating the row on first login. The
/// insert ignores conflicts so two racing first-logins both resolve to the
/// row that won.
async fn resolve_user(pool: &PgPool, identity: &UserIdentity) -> Result<User, ApiError> {
    if let Some(user) = UserRepository::get_by_auth0_id(pool, &identity.auth0_id).await? {
        return Ok(user);
    }

    let candidate = User {
        id: Uuid::new_v4(),
        name: identity.name.trim().to_string(),
        email: identity.email.trim().to_string(),
        auth0_id: identity.auth0_id.clone(),
        pronouns: None,
    };

    let mut tx = pool.begin().await.map_err(ApiError::from)?;
    let inserted = UserRepository::insert_if_absent(&mut tx, &candidate).await?;
    tx.commit().await.map_err(ApiError::from)?;

    if let Some(user) = inserted {
        tracing::info!(user_id = %user.id, "provisioned user on first login");
        return Ok(user);
    }

    UserRepository::get_by_auth0_id(pool, &identity.auth0_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Failed to provision user"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = extract_bearer(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let err = extract_bearer(&headers_with("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(extract_bearer(&headers_with("Bearer   ")).is_err());
    }

    #[test]
    fn bearer_token_is_extracted() {
        let token = extract_bearer(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }
}
