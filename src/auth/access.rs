use crate::error::AppError;
use crate::models::{Task, User};

/// Gates task operations to their creator.
///
/// A mismatch is reported as `NotFound`, never as forbidden, so non-owners
/// cannot learn whether a task id exists. Pure predicate, no side effects.
pub fn authorize_task_access(task: &Task, user: &User) -> Result<(), AppError> {
    if task.owner_id == user.id {
        Ok(())
    } else {
        Err(AppError::NotFound("No task is found with this id".into()))
    }
}
