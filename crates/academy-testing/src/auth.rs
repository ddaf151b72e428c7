//! Bearer-token helpers for integration tests.
//!
//! `MockAuth` signs real access/refresh tokens with the test secret so requests
//! pass through the production `Identity` extractor unchanged.

use academy_auth_types::token::{Claims, TokenKind, sign};
use academy_domain::user::AuthRole;
use http::{HeaderName, HeaderValue, header};

pub const TEST_JWT_SECRET: &str = "academy-test-secret";

/// Identity that test requests authenticate as.
pub struct MockAuth {
    pub user_id: i64,
    pub role: AuthRole,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: i64, role: AuthRole) -> Self {
        Self {
            user_id,
            role,
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    pub fn student(user_id: i64) -> Self {
        Self::new(user_id, AuthRole::Student)
    }

    pub fn admin(user_id: i64) -> Self {
        Self::new(user_id, AuthRole::Admin)
    }

    pub fn access_token(&self) -> String {
        self.token(TokenKind::Access)
    }

    pub fn refresh_token(&self) -> String {
        self.token(TokenKind::Refresh)
    }

    /// `Authorization: Bearer <access token>` header pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.access_token()))
            .expect("JWT is a valid header value");
        (header::AUTHORIZATION, value)
    }

    fn token(&self, kind: TokenKind) -> String {
        let claims = Claims::new(self.user_id, self.role, kind);
        sign(&claims, &self.secret).expect("HS256 signing does not fail")
    }
}
