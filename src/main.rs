use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskpad::auth::{AuthMiddleware, AuthService, IdentityResolver, PasswordHasher, TokenCodec};
use taskpad::config::Config;
use taskpad::db::{PgTaskStore, PgUserStore, UserStore};
use taskpad::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Auth core, built once from immutable configuration and shared by all
    // workers. No core component reads the environment at request time.
    let codec = TokenCodec::new(&config.auth);
    let hasher = PasswordHasher::new(config.auth.bcrypt_cost);
    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let auth_service = AuthService::new(users.clone(), hasher, codec.clone());
    let resolver = IdentityResolver::new(codec, users);
    let task_store = PgTaskStore::new(pool.clone());

    log::info!("Starting Taskpad server at {}", config.server_url());

    let bind_address = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(resolver.clone()))
            .app_data(web::Data::new(task_store.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(routes::health::db_ping)
            .service(
                web::scope("/api/v1")
                    .wrap(AuthMiddleware::exempting(&["/api/v1/auth/"]))
                    .configure(routes::config),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
