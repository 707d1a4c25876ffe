use crate::error::AppError;

/// One-way password hashing with bcrypt.
///
/// The work factor comes from configuration rather than ambient state. Both
/// operations are CPU-bound and deliberately slow; callers on the async
/// runtime offload them with `web::block` instead of running them inline.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password. bcrypt salts internally, so hashing the
    /// same plaintext twice yields different strings.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Verifies a plaintext password against a stored hash. Never fails: a
    /// malformed hash simply does not verify.
    pub fn verify(&self, password: &str, hashed_password: &str) -> bool {
        bcrypt::verify(password, hashed_password).unwrap_or(false)
    }
}
