use std::sync::Arc;

use actix_web::web;

use crate::auth::password::PasswordHasher;
use crate::auth::token::{TokenCodec, TokenKind};
use crate::auth::{SignupRequest, TokenResponse};
use crate::db::{NewUser, UserStore};
use crate::error::AppError;
use crate::models::User;

/// Orchestrates the two user-facing auth flows: signup and login.
///
/// Holds no mutable state; safe to clone per worker. Storage lookups suspend
/// on database I/O, and bcrypt work is pushed onto the blocking pool with
/// `web::block` so it never stalls a server worker.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, codec: TokenCodec) -> Self {
        Self {
            users,
            hasher,
            codec,
        }
    }

    /// Creates a new account.
    ///
    /// Email uniqueness is checked before phone uniqueness, so a request
    /// violating both reports the email conflict. The pre-checks are a fast
    /// path only: the database unique constraints remain the final arbiter
    /// when two signups race, and a constraint violation at insert time
    /// surfaces as the same `Conflict`.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, AppError> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict(
                "A user with that email already exists".into(),
            ));
        }

        if let Some(phone) = &request.phone_number {
            if self.users.find_by_phone(phone).await?.is_some() {
                return Err(AppError::Conflict(
                    "A user with that phone number already exists".into(),
                ));
            }
        }

        let hasher = self.hasher.clone();
        let password = request.password;
        let hashed_password = web::block(move || hasher.hash(&password)).await??;

        self.users
            .insert(NewUser {
                email: request.email,
                hashed_password,
                phone_number: request.phone_number,
            })
            .await
    }

    /// Verifies credentials and mints an access token.
    ///
    /// An unknown email and a wrong password produce the identical error, so
    /// responses cannot be used to enumerate accounts. The internal reason is
    /// logged at debug level only.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, AppError> {
        let user = match self.users.find_by_email(username).await? {
            Some(user) => user,
            None => {
                log::debug!("login rejected: no user with email {}", username);
                return Err(Self::invalid_credentials());
            }
        };

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let hashed_password = user.hashed_password.clone();
        let password_matches =
            web::block(move || hasher.verify(&password, &hashed_password)).await?;

        if !password_matches {
            log::debug!("login rejected: wrong password for {}", username);
            return Err(Self::invalid_credentials());
        }

        let access_token = self.codec.issue(&user.email, TokenKind::Access)?;
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".into(),
        })
    }

    fn invalid_credentials() -> AppError {
        AppError::Unauthorized("Invalid email or password".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::db::users::testing::MemoryUserStore;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            jwt_secret: "service-test-secret".to_string(),
            access_token_ttl_minutes: 30,
            bcrypt_cost: 4,
        })
    }

    fn service() -> (AuthService, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        let service = AuthService::new(store.clone(), PasswordHasher::new(4), codec());
        (service, store)
    }

    fn signup_request(email: &str, phone: Option<&str>) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "pw12345678".to_string(),
            phone_number: phone.map(|p| p.to_string()),
        }
    }

    #[actix_rt::test]
    async fn test_signup_persists_hashed_password() {
        let (service, _store) = service();
        let user = service
            .signup(signup_request("u1@example.com", None))
            .await
            .unwrap();

        assert_eq!(user.email, "u1@example.com");
        assert!(!user.confirmed);
        assert_ne!(user.hashed_password, "pw12345678");
        assert!(PasswordHasher::new(4).verify("pw12345678", &user.hashed_password));
    }

    #[actix_rt::test]
    async fn test_signup_duplicate_email_conflicts_without_write() {
        let (service, store) = service();
        service
            .signup(signup_request("dup@example.com", None))
            .await
            .unwrap();

        let err = service
            .signup(signup_request("dup@example.com", None))
            .await
            .unwrap_err();

        match err {
            AppError::Conflict(msg) => assert!(msg.contains("email")),
            other => panic!("Expected Conflict, got {:?}", other),
        }
        assert_eq!(store.user_count(), 1);
    }

    #[actix_rt::test]
    async fn test_signup_duplicate_phone_conflicts() {
        let (service, store) = service();
        service
            .signup(signup_request("first@example.com", Some("+14155550123")))
            .await
            .unwrap();

        let err = service
            .signup(signup_request("second@example.com", Some("+14155550123")))
            .await
            .unwrap_err();

        match err {
            AppError::Conflict(msg) => assert!(msg.contains("phone")),
            other => panic!("Expected Conflict, got {:?}", other),
        }
        assert_eq!(store.user_count(), 1);
    }

    #[actix_rt::test]
    async fn test_signup_double_collision_reports_email_first() {
        let (service, _store) = service();
        service
            .signup(signup_request("both@example.com", Some("+14155550123")))
            .await
            .unwrap();

        let err = service
            .signup(signup_request("both@example.com", Some("+14155550123")))
            .await
            .unwrap_err();

        match err {
            AppError::Conflict(msg) => assert!(msg.contains("email")),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_login_issues_decodable_access_token() {
        let (service, _store) = service();
        service
            .signup(signup_request("login@example.com", None))
            .await
            .unwrap();

        let response = service
            .login("login@example.com", "pw12345678")
            .await
            .unwrap();

        assert_eq!(response.token_type, "bearer");
        let claims = codec().decode(&response.access_token).unwrap();
        assert_eq!(claims.sub, "login@example.com");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[actix_rt::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _store) = service();
        service
            .signup(signup_request("real@example.com", None))
            .await
            .unwrap();

        let unknown_user = service
            .login("ghost@example.com", "pw12345678")
            .await
            .unwrap_err();
        let wrong_password = service
            .login("real@example.com", "not-the-password")
            .await
            .unwrap_err();

        let unknown_msg = match unknown_user {
            AppError::Unauthorized(msg) => msg,
            other => panic!("Expected Unauthorized, got {:?}", other),
        };
        let wrong_msg = match wrong_password {
            AppError::Unauthorized(msg) => msg,
            other => panic!("Expected Unauthorized, got {:?}", other),
        };
        assert_eq!(unknown_msg, wrong_msg);
    }
}
