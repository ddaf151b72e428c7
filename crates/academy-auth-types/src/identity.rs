//! Bearer-token identity extractor.

use academy_domain::user::AuthRole;
use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::request::Parts;
use http::{HeaderValue, StatusCode, header};

use crate::token::{TokenError, validate_access_token};

/// HMAC secret used to validate access tokens. Expose it from the router
/// state with a `FromRef` impl.
#[derive(Debug, Clone)]
pub struct JwtSecret(pub String);

/// Authenticated caller, taken from a valid `Authorization: Bearer <access token>`.
///
/// Role checks (403) are done by use cases after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role: AuthRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == AuthRole::Admin
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("Authentication credentials were not provided.")]
    Missing,
    #[error("Given token not valid for any token type")]
    Invalid(#[source] TokenError),
}

impl AuthRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "NOT_AUTHENTICATED",
            Self::Invalid(_) => "INVALID_TOKEN",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": self.kind(),
            "detail": self.to_string(),
        });
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"))],
            Json(body),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = AuthRejection;

    // axum-core 0.5 declares `fn -> impl Future + Send`; validate synchronously and
    // hand back a 'static future so no borrow of `parts` crosses the await.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = match parts.headers.typed_get::<Authorization<Bearer>>() {
            None => Err(AuthRejection::Missing),
            Some(Authorization(bearer)) => {
                let JwtSecret(secret) = JwtSecret::from_ref(state);
                validate_access_token(bearer.token(), &secret)
                    .map_err(AuthRejection::Invalid)
                    .and_then(|claims| {
                        let user_id = claims.user_id().map_err(AuthRejection::Invalid)?;
                        Ok(Self {
                            user_id,
                            role: claims.role,
                        })
                    })
            }
        };

        if let Err(AuthRejection::Invalid(ref e)) = result {
            tracing::debug!(error = %e, "rejected bearer token");
        }

        async move { result }
    }
}
