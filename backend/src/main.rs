//! Todo service entry-point: loads settings, prepares the database and serves
//! the REST API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use todos::inbound::http::health::HealthState;
use todos::outbound::persistence::{DbPool, run_pending_migrations};
use todos::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| io::Error::other(format!("load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let database_url = settings
        .database_url(&DefaultEnv::new())
        .map_err(io::Error::other)?;

    if settings.run_migrations() {
        apply_migrations(database_url.clone()).await?;
    }

    let pool = DbPool::new(settings.pool_config(database_url))
        .await
        .map_err(|err| io::Error::other(format!("create database pool: {err}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(bind_addr).with_db_pool(pool),
    )?;
    info!(%bind_addr, "todo service listening");
    server.await
}

async fn apply_migrations(database_url: String) -> io::Result<()> {
    let applied = actix_web::rt::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| io::Error::other(format!("apply migrations: {err}")))?;
    info!(applied, "database migrations applied");
    Ok(())
}
