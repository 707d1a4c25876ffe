//! Helpers shared by the integration test files.
//!
//! These tests exercise the full app against a provisioned Postgres database
//! (`DATABASE_URL`); run them with `--ignored`.

use sqlx::PgPool;
use taskpad::config::AuthConfig;

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| "integration-secret".into()),
        access_token_ttl_minutes: 30,
        // Minimum cost keeps integration tests fast.
        bcrypt_cost: 4,
    }
}

pub async fn connect() -> PgPool {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB")
}

pub async fn delete_user(pool: &PgPool, email: &str) {
    let _ =
        sqlx::query("DELETE FROM tasks WHERE owner_id IN (SELECT id FROM users WHERE email = $1)")
            .bind(email)
            .execute(pool)
            .await;
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

// Builds the same app the binary serves. A macro because the concrete type of
// an initialized test service is not nameable.
#[macro_export]
macro_rules! init_app {
    ($pool:expr) => {{
        let auth_config = crate::common::test_auth_config();
        let codec = taskpad::auth::TokenCodec::new(&auth_config);
        let hasher = taskpad::auth::PasswordHasher::new(auth_config.bcrypt_cost);
        let users: std::sync::Arc<dyn taskpad::db::UserStore> =
            std::sync::Arc::new(taskpad::db::PgUserStore::new($pool.clone()));
        let auth_service = taskpad::auth::AuthService::new(users.clone(), hasher, codec.clone());
        let resolver = taskpad::auth::IdentityResolver::new(codec, users);
        let task_store = taskpad::db::PgTaskStore::new($pool.clone());

        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new(auth_service))
                .app_data(actix_web::web::Data::new(resolver))
                .app_data(actix_web::web::Data::new(task_store))
                .wrap(
                    actix_cors::Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(actix_web::middleware::Logger::default())
                .service(taskpad::routes::health::health)
                .service(taskpad::routes::health::db_ping)
                .service(
                    actix_web::web::scope("/api/v1")
                        .wrap(taskpad::auth::AuthMiddleware::exempting(&["/api/v1/auth/"]))
                        .configure(taskpad::routes::config),
                ),
        )
        .await
    }};
}

// Errors raised before a handler runs (middleware rejections) surface as
// service errors rather than responses; this folds both into a status code.
#[macro_export]
macro_rules! call_status {
    ($app:expr, $req:expr) => {{
        match actix_web::test::try_call_service(&$app, $req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.error_response().status(),
        }
    }};
}

// Signs a user up and logs them in, returning a bearer token.
#[macro_export]
macro_rules! signup_and_login {
    ($app:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(serde_json::json!({ "email": $email, "password": "pw12345678" }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 201, "signup failed for {}", $email);

        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_form([("username", $email), ("password", "pw12345678")])
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 200, "login failed for {}", $email);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["access_token"].as_str().expect("token missing").to_owned()
    }};
}
