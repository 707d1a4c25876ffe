use crate::{
    auth::{AuthService, LoginRequest, SignupRequest},
    error::AppError,
    models::UserOut,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns its outward view. The password hash is
/// never included in the response. Conflicting email or phone → 409.
#[post("/signup")]
pub async fn signup(
    auth: web::Data<AuthService>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    let user = auth.signup(signup_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(UserOut::from(user)))
}

/// Login user
///
/// Authenticates a user from form data (`username` carries the email) and
/// returns a bearer access token. Unknown email and wrong password produce
/// the same 401.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Form<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let tokens = auth.login(&login_data.username, &login_data.password).await?;

    Ok(HttpResponse::Ok().json(tokens))
}
