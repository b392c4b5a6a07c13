use std::sync::Arc;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_multipart::form::MultipartFormConfig;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use env_logger::Env;
use tera::Tera;

use vendor_hub::db::establish_connection_pool;
use vendor_hub::domain::category::CategoryRegistry;
use vendor_hub::llm::{GeminiGenerator, TextGenerator};
use vendor_hub::models::config::AppConfig;
use vendor_hub::repository::DieselRepository;
use vendor_hub::routes::api::{api_v1_cities, api_v1_draft_contract, api_v1_vendors};
use vendor_hub::routes::events::{
    add_event_favorite, create_event, delete_event, remove_event_favorite, show_event,
    show_events,
};
use vendor_hub::routes::favorites::{add_favorite, remove_favorite, show_favorites};
use vendor_hub::routes::main::{index, logout, not_assigned, show_categories, show_vendor};
use vendor_hub::routes::messages::{send_message, show_thread, show_threads};
use vendor_hub::routes::vendor::{
    add_service, delete_service, save_profile, show_contracts, show_profile, show_services,
    update_service,
};
use vendor_hub::storage::LocalObjectStore;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const MIN_SECRET_LENGTH: usize = 32;

/// Five photos at the per-file limit plus form fields.
const MULTIPART_TOTAL_LIMIT: usize = 64 * 1024 * 1024;

fn startup_error(message: String) -> std::io::Error {
    log::error!("{message}");
    std::io::Error::other(message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app_config = AppConfig::load()
        .map_err(|e| startup_error(format!("Failed to load configuration: {e}")))?;
    let server_config = app_config.server.clone();

    if server_config.secret.len() < MIN_SECRET_LENGTH {
        return Err(startup_error(format!(
            "server.secret must be at least {MIN_SECRET_LENGTH} bytes"
        )));
    }
    let secret_key = Key::derive_from(server_config.secret.as_bytes());

    let pool = establish_connection_pool(&server_config.database_url)
        .map_err(|e| startup_error(format!("Failed to establish database connection: {e}")))?;

    {
        let mut conn = pool
            .get()
            .map_err(|e| startup_error(format!("Failed to get database connection: {e}")))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| startup_error(format!("Failed to run migrations: {e}")))?;
        for migration in applied {
            log::info!("Applied migration {migration}");
        }
    }

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| startup_error(format!("Template parsing error(s): {e}")))?;

    let generator = GeminiGenerator::new(&app_config.llm)
        .map_err(|e| startup_error(format!("Failed to build text generator: {e}")))?;
    if app_config.llm.api_key.is_empty() {
        log::warn!("llm.api_key is empty; contract drafting will fail");
    }
    let generator: Arc<dyn TextGenerator> = Arc::new(generator);

    std::fs::create_dir_all(&server_config.upload_dir)?;
    let store = web::Data::new(LocalObjectStore::new(
        &server_config.upload_dir,
        &server_config.upload_url,
    ));

    let repo = web::Data::new(DieselRepository::new(pool));
    let registry = web::Data::new(CategoryRegistry::default());
    let tera = web::Data::new(tera);
    let generator = web::Data::new(generator);
    let config_data = web::Data::new(server_config.clone());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting server on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(middleware::Logger::default())
            .app_data(MultipartFormConfig::default().total_limit(MULTIPART_TOTAL_LIMIT))
            .app_data(repo.clone())
            .app_data(registry.clone())
            .app_data(tera.clone())
            .app_data(generator.clone())
            .app_data(store.clone())
            .app_data(config_data.clone())
            .service(Files::new("/assets", "./assets"))
            .service(Files::new(
                &server_config.upload_url,
                &server_config.upload_dir,
            ))
            .service(
                web::scope("/api")
                    .service(api_v1_vendors)
                    .service(api_v1_cities)
                    .service(api_v1_draft_contract),
            )
            .service(index)
            .service(show_categories)
            .service(show_vendor)
            .service(not_assigned)
            .service(logout)
            .service(show_favorites)
            .service(add_favorite)
            .service(remove_favorite)
            .service(show_events)
            .service(create_event)
            .service(show_event)
            .service(delete_event)
            .service(add_event_favorite)
            .service(remove_event_favorite)
            .service(show_profile)
            .service(save_profile)
            .service(show_services)
            .service(add_service)
            .service(update_service)
            .service(delete_service)
            .service(show_contracts)
            .service(show_threads)
            .service(show_thread)
            .service(send_message)
    })
    .bind(bind_address)?
    .run()
    .await
}
