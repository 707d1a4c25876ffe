use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: i32,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// Whether the task has been completed. Defaults to false.
    pub completed: bool,
    /// Identifier of the user who owns the task. Immutable after creation.
    pub owner_id: i32,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task. Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Input structure for partially updating a task. Fields left out of the
/// request body are left untouched.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_create_validation() {
        let valid_input = TaskCreate {
            title: "Valid Task".to_string(),
            description: Some("Valid Description".to_string()),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskCreate {
            title: "".to_string(),
            description: None,
        };
        assert!(
            empty_title.validate().is_err(),
            "Validation should fail for empty title."
        );

        let long_title = TaskCreate {
            title: "a".repeat(201),
            description: None,
        };
        assert!(
            long_title.validate().is_err(),
            "Validation should fail for overly long title."
        );

        let long_description = TaskCreate {
            title: "Valid title for desc test".to_string(),
            description: Some("b".repeat(1001)),
        };
        assert!(
            long_description.validate().is_err(),
            "Validation should fail for overly long description."
        );
    }

    #[test]
    fn test_task_update_validation() {
        // All fields optional: an empty patch is valid
        let empty_patch = TaskUpdate {
            title: None,
            description: None,
            completed: None,
        };
        assert!(empty_patch.validate().is_ok());

        let valid_patch = TaskUpdate {
            title: Some("New title".to_string()),
            description: None,
            completed: Some(true),
        };
        assert!(valid_patch.validate().is_ok());

        // A supplied title must still be non-empty
        let empty_title_patch = TaskUpdate {
            title: Some("".to_string()),
            description: None,
            completed: None,
        };
        assert!(empty_title_patch.validate().is_err());
    }
}
