//! Liveness: database ping plus upload directory check.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub upload_dir: PathBuf,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
    pub uploads: ComponentHealth,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

impl ComponentHealth {
    fn ok(latency_ms: Option<u64>) -> Self {
        Self {
            status: "ok".into(),
            latency_ms,
        }
    }

    fn error() -> Self {
        Self {
            status: "error".into(),
            latency_ms: None,
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

async fn ping_database(db: &DatabaseConnection) -> ComponentHealth {
    let started = Instant::now();
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    match db.execute(ping).await {
        Ok(_) => ComponentHealth::ok(Some(started.elapsed().as_millis() as u64)),
        Err(e) => {
            warn!(error = %e, "health check: database ping failed");
            ComponentHealth::error()
        }
    }
}

async fn check_upload_dir(dir: &Path) -> ComponentHealth {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => ComponentHealth::ok(None),
        Ok(_) => {
            warn!(path = %dir.display(), "health check: upload path is not a directory");
            ComponentHealth::error()
        }
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "health check: upload dir missing");
            ComponentHealth::error()
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database or upload dir unavailable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ping_database(&state.db).await;
    let uploads = check_upload_dir(&state.upload_dir).await;

    let healthy = database.is_ok() && uploads.is_ok();
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database,
            uploads,
        }),
    )
}
