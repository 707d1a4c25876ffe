use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AuthConfig;
use crate::error::AppError;

/// The `type` claim carried by every token this service signs. Only `access`
/// tokens grant API access today; `confirmation` exists for future email
/// confirmation flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Confirmation,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Confirmation => write!(f, "confirmation"),
        }
    }
}

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user's email.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
    /// What the token is for. A token missing this claim does not decode.
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

/// Typed decode failure, kept separate from `AppError` so callers can tell an
/// expired token from a malformed or badly signed one.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// The token was once valid but its `exp` has passed.
    Expired,
    /// Bad signature, malformed structure, or missing/unknown claims.
    Invalid(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "Token has expired"),
            TokenError::Invalid(reason) => write!(f, "Invalid token: {}", reason),
        }
    }
}

/// Signs and verifies compact, expiring bearer tokens.
///
/// Built once at startup from [`AuthConfig`]; the signing key and algorithm
/// are process-wide and never read from the environment inside core logic.
/// Stateless and cheap to clone, safe for unlimited concurrent use.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    access_ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact to the second; no grace window.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
            validation,
            access_ttl: Duration::minutes(config.access_token_ttl_minutes),
        }
    }

    /// Issues a signed token for `subject` with the configured access TTL.
    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, AppError> {
        self.issue_with_ttl(subject, kind, self.access_ttl)
    }

    /// Issues a signed token with an explicit TTL. Two tokens for the same
    /// subject differ whenever the clock has moved, since `exp` changes.
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?
            .timestamp() as usize;

        let claims = Claims {
            sub: subject.to_owned(),
            exp: expiration,
            kind,
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Decodes and verifies a token. Pure and idempotent: decoding the same
    /// token twice yields the same claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}
