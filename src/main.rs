#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::fallback;
use crate::api::method_not_allowed;
use crate::api::router;
use crate::database::Database;
use crate::database::DatabaseConfig;
use crate::utils::env_var_or_else;

mod api;
mod database;
mod graceful_shutdown;
mod notes;
mod root;
#[cfg(test)]
mod tests;
mod utils;

const DEFAULT_RUST_LOG: &str = "notes_service=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app(DatabaseConfig::DetectConfig).await?;

    let address = setup_address()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// The notes table is in place before the router is handed out, so no
/// request is ever served against a missing schema
///
/// # Errors
///
/// Will return `Err` if the database can not be opened or bootstrapped
pub async fn setup_app(database_config: DatabaseConfig) -> Result<Router> {
    let database = Database::from_config(database_config).await?;

    Ok(create_router(database))
}

/// Create the router for the notes service
fn create_router(database: Database) -> Router {
    Router::new()
        .route("/", get(root::root))
        .method_not_allowed_fallback(method_not_allowed)
        .nest("/notes", router())
        .fallback(fallback)
        .layer(Extension(database))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_address() -> Result<SocketAddr> {
    let mut address =
        env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS)).parse::<SocketAddr>()?;

    // optional override of just the port
    if let Ok(port) = std::env::var("PORT") {
        // only check non-empty strings
        if !port.is_empty() {
            let port = port.parse::<u16>()?;

            address.set_port(port);
        }
    }

    Ok(address)
}
