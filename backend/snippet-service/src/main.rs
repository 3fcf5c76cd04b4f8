use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use snippet_service::clients::IdentityClient;
use snippet_service::db::MIGRATOR;
use snippet_service::handlers;
use snippet_service::openapi::ApiDoc;
use snippet_service::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting snippet-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    MIGRATOR.run(&db_pool).await.map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("migrations failed: {e}"))
    })?;

    tracing::info!("Connected to database, migrations applied");

    let identity = IdentityClient::new(&config.identity);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let pool_data = web::Data::new(db_pool);
    let identity_data = web::Data::new(identity);
    let config_data = web::Data::new(config.clone());

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        let cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(pool_data.clone())
            .app_data(identity_data.clone())
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api/v1/openapi.json", openapi_doc),
            )
            // Health check endpoints
            .route("/api/v1/health", web::get().to(handlers::health))
            .route("/api/v1/health/live", web::get().to(handlers::liveness))
            .service(
                web::scope("/api/v1")
                    .route("/feed", web::get().to(handlers::get_feed))
                    .service(
                        web::scope("/posts")
                            .route("", web::get().to(handlers::get_post))
                            .route("/like", web::post().to(handlers::like_post)),
                    )
                    .route("/users", web::get().to(handlers::get_user))
                    .service(
                        web::scope("/search")
                            .route("", web::get().to(handlers::search_posts))
                            .route("/languages", web::get().to(handlers::list_languages)),
                    ),
            )
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(handlers::login))
                    .route("/signup", web::post().to(handlers::signup))
                    .route("/github", web::get().to(handlers::github)),
            )
            .route("/error", web::get().to(handlers::error_page))
    })
    .bind(&bind_address)?
    .run()
    .await
}
