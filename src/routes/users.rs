use crate::{auth::CurrentUser, error::AppError, models::UserOut};
use actix_web::{get, HttpResponse, Responder};

/// Returns the profile of the authenticated user.
#[get("/me")]
pub async fn me(user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(UserOut::from(user.0)))
}
