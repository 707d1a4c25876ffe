use crate::{
    auth::{authorize_task_access, CurrentUser},
    db::PgTaskStore,
    error::AppError,
    models::{TaskCreate, TaskUpdate},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

fn task_not_found() -> AppError {
    AppError::NotFound("No task is found with this id".into())
}

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects owned by the caller.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn list_tasks(
    store: web::Data<PgTaskStore>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = store.list_for_owner(user.0.id).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// Ownership is assigned from the authenticated identity at creation and is
/// immutable afterwards.
///
/// ## Request Body:
/// - `title`: The title of the task (required, non-empty).
/// - `description` (optional): A description of the task.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `422 Unprocessable Entity`: If input validation fails (e.g., empty title).
/// - `500 Internal Server Error`: For database errors.
#[post("")]
pub async fn create_task(
    store: web::Data<PgTaskStore>,
    task_data: web::Json<TaskCreate>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = store.insert(user.0.id, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// The authenticated user must be the owner of the task. A task owned by
/// someone else responds exactly like a missing one.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON if found and owned by the caller.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
/// - `500 Internal Server Error`: For database errors.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<PgTaskStore>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = store
        .find_by_id(task_id.into_inner())
        .await?
        .ok_or_else(task_not_found)?;

    authorize_task_access(&task, &user.0)?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task the authenticated user owns.
///
/// Fields left out of the body are untouched; `updated_at` is refreshed on
/// every successful mutation. The update statement itself is owner-scoped, so
/// the ownership rule holds even if the task changes between read and write.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
/// - `422 Unprocessable Entity`: If input validation fails.
/// - `500 Internal Server Error`: For database errors.
#[patch("/{id}")]
pub async fn update_task(
    store: web::Data<PgTaskStore>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskUpdate>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = store
        .update(task_id.into_inner(), user.0.id, task_data.into_inner())
        .await?
        .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task the authenticated user owns.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid bearer token.
/// - `404 Not Found`: If the task does not exist or is not owned by the caller.
/// - `500 Internal Server Error`: For database errors.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<PgTaskStore>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let deleted = store.delete_for_owner(task_id.into_inner(), user.0.id).await?;

    if !deleted {
        return Err(task_not_found());
    }

    Ok(HttpResponse::NoContent().finish())
}
