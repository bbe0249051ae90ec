use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reeltally::config::Config;
use reeltally::core::preferences::{MemoryPreferences, ThemeService};
use reeltally::middleware::SessionAuth;
use reeltally::modules::accounts::repositories::AccountRepository;
use reeltally::modules::accounts::services::{AuthService, LogMailer, SessionRegistry};
use reeltally::modules::dashboard::SessionHub;
use reeltally::modules::{accounts, clients, dashboard, freelancers, reports, sales};
use reeltally::store::{DocumentStore, MemoryStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reeltally=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Reeltally sales & commission tracking service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // The in-process store backs local runs; deployments swap in the
    // remote document database behind the same trait.
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    let sessions = SessionRegistry::new();
    let auth = AuthService::new(
        AccountRepository::new(Arc::clone(&store)),
        sessions.clone(),
        Arc::new(LogMailer),
    );
    let hub = SessionHub::new(Arc::clone(&store), config.app.rollup_size);
    let themes = ThemeService::new(Arc::new(MemoryPreferences::new()));

    let store_data: web::Data<dyn DocumentStore> = web::Data::from(store);
    let auth_data = web::Data::new(auth);
    let hub_data = web::Data::new(hub);
    let themes_data = web::Data::new(themes);
    let config_data = web::Data::new(config.clone());

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(SessionAuth::new(sessions.clone()))
            .wrap(Cors::permissive())
            .app_data(store_data.clone())
            .app_data(auth_data.clone())
            .app_data(hub_data.clone())
            .app_data(themes_data.clone())
            .app_data(config_data.clone())
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
            .configure(accounts::controllers::configure)
            .configure(sales::controllers::configure)
            .configure(clients::controllers::configure)
            .configure(freelancers::controllers::configure)
            .configure(reports::controllers::configure)
            .configure(dashboard::controllers::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "reeltally"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Reeltally Sales & Commission Tracking",
        "version": "0.1.0",
        "status": "running"
    }))
}
