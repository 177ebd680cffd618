//! Backend entry-point: loads configuration, connects the database when one
//! is configured, and serves the dashboard API.

mod server;

use std::env;
use std::ffi::OsString;
use std::net::SocketAddr;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use invoice_dashboard::inbound::http::health::HealthState;
use invoice_dashboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
use invoice_dashboard::outbound::persistence::{DatabaseSettings, DbPool};

use server::{ServerConfig, create_server};

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

fn bind_addr() -> std::io::Result<SocketAddr> {
    let raw = env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
    raw.parse().map_err(|err| {
        std::io::Error::other(format!("invalid {BIND_ADDR_ENV} '{raw}': {err}"))
    })
}

async fn connect_database() -> std::io::Result<Option<DbPool>> {
    let settings = DatabaseSettings::load_from_iter([OsString::from("invoice-dashboard")])
        .map_err(|err| std::io::Error::other(format!("database settings: {err}")))?;
    let Some(pool_config) = settings.pool_config() else {
        warn!("no database configured; serving in-memory fixtures");
        return Ok(None);
    };
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = bind_addr()?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    if let Some(pool) = connect_database().await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
