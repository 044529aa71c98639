use std::net::SocketAddr;
use std::process::ExitCode;

use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use tavern::logging::init_tracing;
use tavern::router::init_router;
use tavern::state::init_app_state;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // Dropped when main returns, flushing the file writers.
    let _log_guards = init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let state = init_app_state().await?;
    info!(
        environment = ?state.environment,
        password_scheme = state.verifier.scheme(),
        "Application state initialized"
    );

    let port: u16 = match std::env::var("PORT") {
        Ok(raw) => raw.parse()?,
        Err(_) => 3000,
    };

    let app = init_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🚀 Server running on http://localhost:{}", port);
    info!("📚 Swagger UI available at http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
