use std::env;

/// Authentication-related configuration, read once at process start and
/// injected into `TokenCodec` and `PasswordHasher` constructors. Core logic
/// never reads the environment directly.
pub struct AuthConfig {
    /// Symmetric secret for signing/verifying JWTs (HS256).
    pub jwt_secret: String,
    /// Lifetime of access tokens, in minutes.
    pub access_token_ttl_minutes: i64,
    /// bcrypt work factor.
    pub bcrypt_cost: u32,
}

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
                access_token_ttl_minutes: env::var("ACCESS_TOKEN_TTL_MINUTES")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("ACCESS_TOKEN_TTL_MINUTES must be a number"),
                bcrypt_cost: env::var("BCRYPT_COST")
                    .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
                    .parse()
                    .expect("BCRYPT_COST must be a number"),
            },
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
