/**
 * Snipbox Server Entry Point
 *
 * This is the main entry point for the Snipbox backend server.
 * It loads configuration, builds the app and serves it over HTTP.
 */

use std::net::SocketAddr;

use snipbox::backend::middleware::recover::install_panic_hook;
use snipbox::backend::server::{create_app, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    install_panic_hook();

    let config = ServerConfig::from_env()?;
    if !config.session.secure {
        tracing::warn!("SESSION_COOKIE_SECURE is off; session cookies will be sent over plain HTTP");
    }

    let app = create_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "Starting server");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
