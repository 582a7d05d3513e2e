//! Service tunables — loaded from environment variables.

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Upper bound on pooled PostgreSQL connections.
    pub db_max_connections: usize,
    /// Port for the Prometheus exporter; 0 disables it.
    pub metrics_port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let db_max_connections = std::env::var("STUDENT_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        let metrics_port = std::env::var("STUDENT_METRICS_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(9000);

        if metrics_port == 0 {
            tracing::warn!("STUDENT_METRICS_PORT is 0 -- Prometheus exporter disabled");
        }

        Self {
            db_max_connections,
            metrics_port,
        }
    }

    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port != 0
    }
}
