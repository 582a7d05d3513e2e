//! Student registry server.
//!
//! Serves the `/student` CRUD API. Storage is PostgreSQL when a database
//! URL is given, otherwise an in-process store that lives as long as the
//! process.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use student_server::config::ServerConfig;
use student_server::handlers::StudentHandler;
use student_server::repository::{
    postgres, MemoryStudentRepository, PgStudentRepository, StudentRepository,
};
use student_server::routes::{student_router, StudentRouterState};
use student_server::{metrics, migration, seeder};

#[derive(Parser)]
#[command(name = "student-server", about = "Student registry REST service")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "STUDENT_PORT", default_value = "8080")]
    port: u16,

    /// PostgreSQL connection URL; the in-memory store is used when absent
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Insert demo students into an empty store at startup
    #[arg(long, env = "STUDENT_SEED")]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }

    let cli = Cli::parse();
    let config = ServerConfig::from_env();

    tracing::info!("Starting student registry...");

    let repo: Arc<dyn StudentRepository> = match cli.database_url {
        Some(db_url) => {
            let pool = postgres::build_pool(&db_url, config.db_max_connections)?;
            {
                let mut conn = pool
                    .get()
                    .await
                    .map_err(|e| anyhow::anyhow!("diesel pool: {e}"))?;
                tracing::info!("Running student migration...");
                migration::run_migration(&mut conn).await?;
                tracing::info!("Student migration completed.");
            }
            Arc::new(PgStudentRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set -- using in-memory store, data is lost on exit");
            Arc::new(MemoryStudentRepository::new())
        }
    };

    if cli.seed {
        seeder::seed_students(repo.as_ref()).await?;
    }

    if config.metrics_enabled() {
        metrics::init_metrics(SocketAddr::from(([0, 0, 0, 0], config.metrics_port)));
    }

    let state = StudentRouterState::new(StudentHandler::new(repo));
    let app = Router::new()
        .merge(student_router(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!("Student registry listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
