//! Hotel Admin server
//!
//! Reads configuration from TOML (`$HOTEL_ADMIN_CONFIG` or
//! ~/.config/hotel-admin/config.toml) and serves the REST API.

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hotel_admin::application::services::DefaultAdmin;
use hotel_admin::config::LoggingConfig;
use hotel_admin::infrastructure::ShutdownCoordinator;
use hotel_admin::{
    create_api_router, default_config_path, init_database, run_migrations, AppConfig,
    AppServices, AppState, DatabaseConfig,
};

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let (app_cfg, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_tracing(&app_cfg.logging);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    info!("Starting Hotel Admin...");

    // Recorder must be installed before the first metrics call.
    let prometheus_handle = match metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
            None
        }
    };

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig::from(&app_cfg.database);
    info!("Database: {}", db_config.url);
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = run_migrations(&db).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }

    // ── Services ───────────────────────────────────────────────
    tokio::fs::create_dir_all(&app_cfg.media.upload_dir).await?;
    let services = AppServices::from_database(db.clone(), &app_cfg);
    match services
        .users
        .ensure_default_admin(&DefaultAdmin::from(&app_cfg.security))
        .await
    {
        Ok(true) => warn!(
            "Default admin {} created, change its password",
            app_cfg.security.admin_email
        ),
        Ok(false) => {}
        Err(e) => error!("Failed to create default admin: {}", e),
    }

    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    let state = AppState::new(services, db.clone(), &app_cfg.media);
    let router = create_api_router(state, prometheus_handle);

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let server_signal = shutdown_signal.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { server_signal.wait().await })
            .await
    });

    // In-flight requests drain before the pool is closed.
    let clean = shutdown
        .shutdown_with_cleanup(|| async move {
            match server.await {
                Ok(Ok(())) => info!("REST API server stopped"),
                Ok(Err(e)) => error!("REST API server error: {}", e),
                Err(e) => error!("REST API server task panicked: {}", e),
            }
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            }
        })
        .await;
    if !clean {
        warn!("Shutdown cleanup did not finish in time");
    }

    info!("Hotel Admin shutdown complete");
    Ok(())
}
