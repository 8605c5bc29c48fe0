use actix_web::{
    middleware::{Condition, NormalizePath},
    web, App, HttpServer,
};
use portfolio_api::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    middlewares::{auth::AuthMiddleware, error_detail::expose_internal_errors},
    routes::configure_routes,
    settings::{AppConfig, StorageBackend},
    shared_repos::SharedRepositories,
    telemetry::init_tracing,
    web::cors::build_cors,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let repos = match config.storage {
        StorageBackend::Postgres => {
            let pool = create_pool(&config.database_url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            SharedRepositories::postgres(pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            SharedRepositories::in_memory()
        }
    };

    let app_state = web::Data::new(AppState::new(&config, repos));
    let server_addr = config.server_addr();
    let expose_errors = !config.is_production();

    tracing::info!(
        "🚀 Starting Portfolio API v{} on {} ({} storage)",
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.storage
    );

    let cors_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Condition::new(expose_errors, expose_internal_errors()))
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(&server_addr)?
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => res?,
        _ = shutdown_signal() => {
            handle.stop(true).await;
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}
