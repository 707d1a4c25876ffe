pub mod access;
pub mod extractors;
pub mod identity;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use access::authorize_task_access;
pub use extractors::CurrentUser;
pub use identity::IdentityResolver;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use service::AuthService;
pub use token::{Claims, TokenCodec, TokenError, TokenKind};

lazy_static! {
    // Normalized international phone numbers: leading +, 7 to 15 digits.
    static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\+[1-9][0-9]{6,14}$").unwrap();
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 8 characters long.
    #[validate(length(min = 8))]
    pub password: String,
    /// Optional phone number in normalized international form.
    #[validate(regex(
        path = "PHONE_REGEX",
        message = "Phone number must be in international format, e.g. +14155550123"
    ))]
    pub phone_number: Option<String>,
}

/// Represents the payload for a user login request, submitted as form data.
/// The `username` field carries the user's email.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed JWT granting API access until it expires.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
}
