use std::sync::Arc;

use crate::auth::token::{TokenCodec, TokenKind};
use crate::db::UserStore;
use crate::error::AppError;
use crate::models::User;

/// Resolves a bearer token into the authenticated user.
///
/// Resolution is stateless per call: decode the token, require the expected
/// `type` claim, then look the subject up in storage. Nothing is cached across
/// requests. Every failure becomes a 401 whose message distinguishes expired /
/// invalid / wrong-type / unknown-subject; the reason is also logged at debug
/// level.
#[derive(Clone)]
pub struct IdentityResolver {
    codec: TokenCodec,
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(codec: TokenCodec, users: Arc<dyn UserStore>) -> Self {
        Self { codec, users }
    }

    /// Suspends on a storage lookup for the token subject.
    pub async fn resolve(&self, token: &str, expected: TokenKind) -> Result<User, AppError> {
        let claims = self.codec.decode(token).map_err(|e| {
            log::debug!("token rejected: {}", e);
            AppError::Unauthorized(e.to_string())
        })?;

        if claims.kind != expected {
            log::debug!(
                "token rejected: kind {} where {} was expected",
                claims.kind,
                expected
            );
            return Err(AppError::Unauthorized(format!(
                "Token has incorrect type, expected '{}'",
                expected
            )));
        }

        match self.users.find_by_email(&claims.sub).await? {
            Some(user) => Ok(user),
            None => {
                log::debug!("token rejected: no user for subject {}", claims.sub);
                Err(AppError::Unauthorized(
                    "Could not find user for this token".into(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::db::users::testing::MemoryUserStore;
    use crate::db::NewUser;
    use chrono::Duration;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            jwt_secret: "resolver-test-secret".to_string(),
            access_token_ttl_minutes: 30,
            bcrypt_cost: 4,
        })
    }

    async fn resolver_with_user(email: &str) -> IdentityResolver {
        let store = Arc::new(MemoryUserStore::new());
        store
            .insert(NewUser {
                email: email.to_string(),
                hashed_password: "irrelevant-hash".to_string(),
                phone_number: None,
            })
            .await
            .unwrap();
        IdentityResolver::new(codec(), store)
    }

    #[actix_rt::test]
    async fn test_resolve_valid_access_token() {
        let resolver = resolver_with_user("me@example.com").await;
        let token = codec().issue("me@example.com", TokenKind::Access).unwrap();

        let user = resolver.resolve(&token, TokenKind::Access).await.unwrap();
        assert_eq!(user.email, "me@example.com");
    }

    #[actix_rt::test]
    async fn test_resolve_rejects_wrong_token_kind() {
        let resolver = resolver_with_user("me@example.com").await;
        let token = codec()
            .issue("me@example.com", TokenKind::Confirmation)
            .unwrap();

        match resolver.resolve(&token, TokenKind::Access).await {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("incorrect type")),
            other => panic!("Expected Unauthorized, got {:?}", other.map(|u| u.email)),
        }
    }

    #[actix_rt::test]
    async fn test_resolve_rejects_expired_token() {
        let resolver = resolver_with_user("me@example.com").await;
        let token = codec()
            .issue_with_ttl("me@example.com", TokenKind::Access, Duration::minutes(-5))
            .unwrap();

        match resolver.resolve(&token, TokenKind::Access).await {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("expired")),
            other => panic!("Expected Unauthorized, got {:?}", other.map(|u| u.email)),
        }
    }

    #[actix_rt::test]
    async fn test_resolve_rejects_unknown_subject() {
        let resolver = resolver_with_user("someone@example.com").await;
        let token = codec().issue("ghost@example.com", TokenKind::Access).unwrap();

        match resolver.resolve(&token, TokenKind::Access).await {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("Could not find user"))
            }
            other => panic!("Expected Unauthorized, got {:?}", other.map(|u| u.email)),
        }
    }

    #[actix_rt::test]
    async fn test_resolve_rejects_garbage() {
        let resolver = resolver_with_user("me@example.com").await;

        match resolver.resolve("garbage.token.here", TokenKind::Access).await {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("Invalid token")),
            other => panic!("Expected Unauthorized, got {:?}", other.map(|u| u.email)),
        }
    }
}
