use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glowdesk::config::Config;
use glowdesk::middleware::BearerAuth;
use glowdesk::modules::appointments::repositories::AppointmentRepository;
use glowdesk::modules::appointments::services::{
    AppointmentService, ReferenceSource, RepositoryReferenceSource,
};
use glowdesk::modules::auth::{AuthService, UserRepository};
use glowdesk::modules::catalog::{PackageRepository, ServiceRepository};
use glowdesk::modules::customers::CustomerRepository;
use glowdesk::modules::revenue::{RevenueRepository, RevenueService};
use glowdesk::modules::staff::StaffRepository;
use glowdesk::modules::{
    appointments, auth, catalog, customers, dashboard, health, revenue, staff,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glowdesk=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting GlowDesk salon back-office API");
    tracing::info!("Environment: {}", config.app.env);

    // Create database connection pool and apply migrations
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Repositories
    let customer_repo = Arc::new(CustomerRepository::new(db_pool.clone()));
    let staff_repo = Arc::new(StaffRepository::new(db_pool.clone()));
    let service_repo = Arc::new(ServiceRepository::new(db_pool.clone()));
    let package_repo = Arc::new(PackageRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let appointment_repo = Arc::new(AppointmentRepository::new(db_pool.clone()));
    let revenue_repo = Arc::new(RevenueRepository::new(db_pool.clone()));

    // Services
    let references: Arc<dyn ReferenceSource> = Arc::new(RepositoryReferenceSource::new(
        customer_repo.clone(),
        staff_repo.clone(),
        service_repo.clone(),
    ));
    let appointment_service = Arc::new(AppointmentService::new(
        appointment_repo,
        references,
        user_repo.clone(),
    ));
    let revenue_service = Arc::new(RevenueService::new(revenue_repo, staff_repo.clone()));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        config.security.token_ttl_hours,
    ));

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let cors_origins = config.security.cors_allowed_origins.clone();

    let server = HttpServer::new(move || {
        let cors = if cors_origins.trim() == "*" {
            Cors::permissive()
        } else {
            cors_origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .fold(
                    Cors::default().allow_any_method().allow_any_header(),
                    |cors, origin| cors.allowed_origin(origin),
                )
        };

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(customer_repo.clone()))
            .app_data(web::Data::new(staff_repo.clone()))
            .app_data(web::Data::new(service_repo.clone()))
            .app_data(web::Data::new(package_repo.clone()))
            .app_data(web::Data::new(user_repo.clone()))
            .app_data(web::Data::new(appointment_service.clone()))
            .app_data(web::Data::new(revenue_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .wrap(BearerAuth::new(db_pool.clone()))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .route("/", web::get().to(index))
            .configure(health::controllers::configure)
            .configure(auth::controllers::configure)
            .configure(customers::controllers::configure)
            .configure(staff::controllers::configure)
            .configure(catalog::controllers::configure_services)
            .configure(catalog::controllers::configure_packages)
            .configure(appointments::controllers::configure)
            .configure(revenue::controllers::configure)
            .configure(dashboard::controllers::configure)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "GlowDesk Salon Back-Office API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}
