pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use crate::config::{AppConfig, DatabaseType};
use crate::error::{Error, Result};
use crate::routes::create_router;
use crate::state::AppState;

pub async fn start_service(app_config: AppConfig) -> Result<()> {
    let AppConfig {
        settings,
        server_config,
    } = app_config;

    tracing::info!(
        app_name = %settings.app_name,
        db_type = %settings.db_type,
        database_url = %settings.redacted_database_url(),
        "starting service"
    );
    if settings.db_type == DatabaseType::Postgres {
        tracing::debug!(engine_options = ?settings.engine_options(), "postgres pool configured");
    }
    if settings.echo {
        tracing::info!("SQL echo requested for the database client");
    }

    let app = create_router(AppState::new(settings));

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal, stopping server");
}
