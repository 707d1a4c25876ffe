//!
//! # Storage Layer
//!
//! Explicit repository types over the shared `PgPool`. Rows come back as plain
//! data structs; nothing here performs implicit I/O as a side effect of field
//! access. The auth core depends on the [`UserStore`] trait rather than a
//! concrete store so it can be exercised without a database.

pub mod tasks;
pub mod users;

pub use tasks::PgTaskStore;
pub use users::{NewUser, PgUserStore, UserStore};
