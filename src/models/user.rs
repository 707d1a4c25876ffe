use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a user row as stored in the database.
///
/// This struct is internal to the service: it carries the password hash and is
/// therefore never serialized outward. Handlers convert it to [`UserOut`]
/// before responding.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    /// Unique, case-sensitive-as-stored; the primary login handle and the
    /// token subject.
    pub email: String,
    /// Optional phone number in normalized international form; unique when
    /// present.
    pub phone_number: Option<String>,
    /// Opaque bcrypt hash.
    pub hashed_password: String,
    /// Defaults to false. Modeled but not enforced as a login gate.
    pub confirmed: bool,
}

/// Outward view of a user, safe to serialize in API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserOut {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub confirmed: bool,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            phone_number: user.phone_number,
            confirmed: user.confirmed,
        }
    }
}
