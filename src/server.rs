//! Reusable catalog server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: database init, migrations,
//! REST API, and graceful shutdown. [`seed_catalog`] is the one-shot import
//! used by the `seed` command.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{
    CategoryService, CategoryUseCase, ProductService, ProductUseCase, SeedService,
};
use crate::config::AppConfig;
use crate::domain::{RepositoryProvider, SeedReport};
use crate::infrastructure::database::{init_database, run_migrations, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::ShutdownSignal;

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running catalog API.
///
/// ```rust,no_run
/// use storefront_catalog::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Port actually bound; differs from the config when it asked for 0.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, bind the listener and start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting storefront catalog...");

        let db = connect(&app_cfg, opts.auto_migrate).await?;

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let categories = Arc::new(CategoryUseCase::new(Arc::new(CategoryService::new(
            repos.clone(),
        ))));
        let products = Arc::new(ProductUseCase::new(Arc::new(ProductService::new(
            repos.clone(),
        ))));

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(ApiState {
            db: db.clone(),
            categories,
            products,
            public_url: app_cfg.server.public_url.clone(),
            started_at: Arc::new(Instant::now()),
        });

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        let api_port = local_addr.port();
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM / Ctrl+C.
    pub fn install_signal_handler(&self) {
        self.shutdown.listen_for_os_signals();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered, then
    /// close the pool.
    pub async fn wait(self) {
        let timeout = Duration::from_secs(self.config.server.shutdown_timeout);
        info!("Waiting up to {}s for in-flight requests...", timeout.as_secs());

        let mut api_task = self.api_task;
        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!("Shutdown timeout elapsed, aborting open connections");
                api_task.abort();
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
        info!("Storefront catalog shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down storefront catalog...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

async fn connect(
    app_cfg: &AppConfig,
    auto_migrate: bool,
) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let db = init_database(&app_cfg.database.to_database_config()).await?;
    if auto_migrate {
        info!("Running database migrations...");
        run_migrations(&db).await?;
    }
    Ok(db)
}

/// Migrate, then replace the stored catalog with the contents of `data_path`.
pub async fn seed_catalog(
    app_cfg: &AppConfig,
    data_path: &Path,
) -> Result<SeedReport, Box<dyn std::error::Error>> {
    let db = connect(app_cfg, true).await?;
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    info!("Loading seed data from {}", data_path.display());
    let data = SeedService::load_seed_file(data_path).await?;
    let report = SeedService::new(repos).seed(data).await;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }
    Ok(report?)
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Records emitted through the `log`
/// facade are captured as well. Call once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn test_config(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.sqlite.path = dir.join("catalog.db").display().to_string();
        config.database.pool.max_connections = 2;
        config
    }

    #[tokio::test]
    async fn seed_then_serve_then_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories":[{{"name":"Sale"}},{{"name":"Winter"}}],
                "products":[{{"name":"Boots","price":89.5,"categories":["Winter"]}}]}}"#
        )
        .unwrap();

        let report = seed_catalog(&config, file.path()).await.unwrap();
        assert_eq!(report.categories, 2);
        assert_eq!(report.links, 1);

        let handle = ServerHandle::start(ServerOptions {
            config,
            auto_migrate: true,
        })
        .await
        .unwrap();
        assert_ne!(handle.api_port, 0);
        assert!(handle.is_running());
        assert_eq!(handle.repos.categories().find().await.unwrap().len(), 2);

        handle.shutdown().await;
    }
}
