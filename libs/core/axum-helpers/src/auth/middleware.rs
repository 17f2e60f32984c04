use super::jwt::TokenVerifier;
use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// Identity established by [`jwt_auth_middleware`].
///
/// Handlers take it as an argument. On a route without the gate it rejects
/// with 401 instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(AppError::unauthorized)
    }
}

/// `Authorization: Bearer <token>` with a case-insensitive scheme.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// JWT authentication middleware.
///
/// Rejects with 401 before the handler runs unless the request carries a
/// bearer token that `verifier` accepts. On success an [`AuthenticatedUser`]
/// is inserted into the request extensions.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn_with_state(
///         Arc::new(jwt),
///         jwt_auth_middleware::<JwtAuth>,
///     ));
/// ```
pub async fn jwt_auth_middleware<V>(
    State(verifier): State<Arc<V>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError>
where
    V: TokenVerifier + 'static,
{
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("Missing or malformed Authorization header");
        return Err(AppError::unauthorized());
    };

    let claims = verifier.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, "JWT verification failed");
        AppError::unauthorized()
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::debug!(reason = %e, "JWT subject is not a user id");
        AppError::unauthorized()
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{JwtClaims, MockTokenVerifier, TokenError};
    use axum::{
        Router, body::Body, http::Request as HttpRequest, http::StatusCode,
        middleware::from_fn_with_state, routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn whoami(user: AuthenticatedUser) -> String {
        user.user_id.to_string()
    }

    fn app(verifier: MockTokenVerifier) -> Router {
        Router::new().route("/me", get(whoami)).layer(from_fn_with_state(
            Arc::new(verifier),
            jwt_auth_middleware::<MockTokenVerifier>,
        ))
    }

    fn request(authorization: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/me");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_never_calls_verifier() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().never();

        let response = app(verifier).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Authentication required");
    }

    #[tokio::test]
    async fn test_malformed_header_never_calls_verifier() {
        for value in ["Basic abc", "Bearer", "Bearer   ", "token-without-scheme"] {
            let mut verifier = MockTokenVerifier::new();
            verifier.expect_verify().never();

            let response = app(verifier).oneshot(request(Some(value))).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{value}");
        }
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let user_id = Uuid::now_v7();
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "good")
            .times(1)
            .returning(move |_| {
                Ok(JwtClaims {
                    sub: user_id.to_string(),
                    exp: i64::MAX,
                })
            });

        let response = app(verifier)
            .oneshot(request(Some("bearer good")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, user_id.to_string());
    }

    #[tokio::test]
    async fn test_rejected_token_is_generic_401() {
        for failure in [
            TokenError::Expired,
            TokenError::InvalidSignature,
            TokenError::Malformed,
        ] {
            let mut verifier = MockTokenVerifier::new();
            verifier
                .expect_verify()
                .times(1)
                .returning(move |_| Err(failure.clone()));

            let response = app(verifier)
                .oneshot(request(Some("Bearer whatever")))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let body: serde_json::Value =
                serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body["message"], "Authentication required");
        }
    }

    #[tokio::test]
    async fn test_extractor_without_gate_is_401() {
        let response = Router::new()
            .route("/me", get(whoami))
            .oneshot(request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "BEARER abc.def".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, "Token abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
